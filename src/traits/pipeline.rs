//! Trait table → KGX graph transform.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::lookup::{EnvironmentTable, MetabolismTable};
use super::row::{columns, TraitRow};
use super::slots::{Slot, CHEBI, CHEMICAL_SUBSTANCE, NCBI_TAXON};
use super::summary::{file_digest, TransformSummary};
use crate::config::Config;
use crate::error::{KgError, ParseError, Result};
use crate::graph::{output_paths, GraphEdge, GraphNode, GraphWriter};
use crate::ontology::{extractor_from_config, SubsetExtractor};
use crate::resolver::{
    EntityResolver, LabelNormalization, MatchIndex, Remnants, ResolveOptions, SynonymIndex,
};
use crate::tabular::{Header, LineParser};
use crate::utils::{collapse_term, Sentinels};

/// Seed terms for subset extraction, written to the transform output directory.
pub const SUBSET_TERMS_FILE: &str = "subset_terms.txt";
pub const CHEBI_REMNANTS_FILE: &str = "remnantsCHEBI.tsv";
pub const GO_REMNANTS_FILE: &str = "remnantsGO.tsv";

/// Input files of one run.
#[derive(Debug, Clone)]
struct Inputs {
    data: PathBuf,
    environment: PathBuf,
    ner: Option<NerInputs>,
}

#[derive(Debug, Clone)]
struct NerInputs {
    chebi_matches: PathBuf,
    go_matches: PathBuf,
    chebi_sssom: PathBuf,
    go_sssom: PathBuf,
}

impl Inputs {
    fn from_config(config: &Config) -> Self {
        let input_dir = config.paths.input_dir();
        let nlp_output = config.paths.nlp_output_dir();
        let traits = &config.traits;
        Self {
            data: input_dir.join(&traits.data_file),
            environment: input_dir.join(&traits.environment_file),
            ner: traits.nlp.then(|| NerInputs {
                chebi_matches: nlp_output.join(&traits.chebi_matches),
                go_matches: nlp_output.join(&traits.go_matches),
                chebi_sssom: input_dir.join(&traits.chebi_sssom),
                go_sssom: input_dir.join(&traits.go_sssom),
            }),
        }
    }

    /// Fail on the first absent input before any output is written.
    fn check(&self) -> Result<()> {
        let mut required = vec![&self.data, &self.environment];
        if let Some(ner) = &self.ner {
            required.extend([&ner.chebi_matches, &ner.go_matches, &ner.chebi_sssom, &ner.go_sssom]);
        }
        match required.into_iter().find(|p| !p.is_file()) {
            Some(missing) => Err(KgError::MissingInput(missing.clone())),
            None => Ok(()),
        }
    }
}

/// Per-run mutable state.
struct RunState<W: Write> {
    graph: GraphWriter<W>,
    terms: BufWriter<File>,
    chebi_remnants: Remnants,
    go_remnants: Remnants,
    organisms: usize,
    rows_processed: usize,
    rows_skipped: usize,
}

/// Resolves every row of the trait table and writes `nodes.tsv` / `edges.tsv`.
pub struct TraitsPipeline {
    config: Config,
    extractor: Box<dyn SubsetExtractor>,
}

impl TraitsPipeline {
    pub fn new(config: Config) -> Self {
        let extractor = extractor_from_config(&config.subset, &config.paths.input_dir());
        Self { config, extractor }
    }

    /// Replace the subset extractor built from configuration.
    pub fn with_extractor(mut self, extractor: Box<dyn SubsetExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory receiving `nodes.tsv`, `edges.tsv` and the subset terms.
    pub fn output_dir(&self) -> PathBuf {
        self.config
            .paths
            .output_dir()
            .join(&self.config.traits.source_name)
    }

    pub fn run(&self) -> Result<TransformSummary> {
        let started_at = Utc::now();
        let traits = &self.config.traits;
        let inputs = Inputs::from_config(&self.config);
        inputs.check()?;

        let sentinels = Sentinels::new(&traits.not_applicable, &traits.unknown_suffix);
        let (chemicals, pathways) = self.build_resolvers(&inputs, &sentinels)?;
        let environments = EnvironmentTable::from_path(&inputs.environment)?;
        let metabolism = MetabolismTable::new(traits.metabolism.clone());

        let output_dir = self.output_dir();
        let terms_path = output_dir.join(SUBSET_TERMS_FILE);
        let graph = GraphWriter::create(&output_dir, sentinels.clone())?;
        let mut state = RunState {
            graph,
            terms: BufWriter::new(File::create(&terms_path)?),
            chebi_remnants: Remnants::new(),
            go_remnants: Remnants::new(),
            organisms: 0,
            rows_processed: 0,
            rows_skipped: 0,
        };

        info!(
            source = %traits.source_name,
            input = %inputs.data.display(),
            nlp = traits.nlp,
            "Transforming trait table"
        );

        let resolvers = RowResolvers {
            chemicals: &chemicals,
            pathways: &pathways,
            environments: &environments,
            metabolism: &metabolism,
            sentinels: &sentinels,
        };
        let parser = LineParser::new(traits.delimiter, traits.placeholder);
        let reader = BufReader::new(File::open(&inputs.data)?);
        let mut header: Option<Arc<Header>> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let header = match header.as_ref().map(Arc::clone) {
                Some(header) => header,
                None => {
                    let parsed = parser.parse_header(&line);
                    parsed.require(&columns::REQUIRED, &inputs.data.display().to_string())?;
                    header = Some(parsed);
                    continue;
                }
            };

            let record = parser.parse_line(&line, &header, index + 1)?;
            let row = TraitRow::from_record(&record, parser.placeholder());
            resolvers.process_row(&row, &mut state)?;
        }
        if header.is_none() {
            return Err(ParseError::EmptyInput(inputs.data.display().to_string()).into());
        }

        let RunState {
            graph,
            mut terms,
            chebi_remnants,
            go_remnants,
            organisms,
            rows_processed,
            rows_skipped,
        } = state;
        let counts = graph.finish()?;
        terms.flush()?;
        drop(terms);

        let nlp_output = self.config.paths.nlp_output_dir();
        fs::create_dir_all(&nlp_output)?;
        chebi_remnants.write_tsv(nlp_output.join(CHEBI_REMNANTS_FILE))?;
        go_remnants.write_tsv(nlp_output.join(GO_REMNANTS_FILE))?;
        debug!(
            chebi = chebi_remnants.len(),
            go = go_remnants.len(),
            dir = %nlp_output.display(),
            "Wrote remnants"
        );

        let subset_output = self.extractor.extract(&terms_path, &output_dir)?;

        let (nodes_path, edges_path) = output_paths(&output_dir);
        let summary = TransformSummary {
            source_name: traits.source_name.clone(),
            output_dir,
            rows_processed,
            rows_skipped,
            nodes_written: counts.nodes,
            edges_written: counts.edges,
            organisms,
            chebi_remnants: chebi_remnants.len(),
            go_remnants: go_remnants.len(),
            nlp: traits.nlp,
            nodes_sha256: file_digest(&nodes_path)?,
            edges_sha256: file_digest(&edges_path)?,
            subset_output,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            rows = summary.rows_processed,
            nodes = summary.nodes_written,
            edges = summary.edges_written,
            duration_ms = summary.duration_ms(),
            "Trait transform complete"
        );
        Ok(summary)
    }

    fn build_resolvers(
        &self,
        inputs: &Inputs,
        sentinels: &Sentinels,
    ) -> Result<(EntityResolver, EntityResolver)> {
        let (chebi_matches, chebi_synonyms, go_matches, go_synonyms) = match &inputs.ner {
            Some(ner) => (
                MatchIndex::from_path(&ner.chebi_matches)?,
                SynonymIndex::from_path(&ner.chebi_sssom, LabelNormalization::Plain)?,
                MatchIndex::from_path(&ner.go_matches)?,
                SynonymIndex::from_path(&ner.go_sssom, LabelNormalization::Underscores)?,
            ),
            None => {
                info!("NER disabled; every term resolves to its fallback id");
                Default::default()
            }
        };

        let options = |slot: Slot, allow_broad: bool| ResolveOptions {
            prefix: slot.prefix().to_string(),
            default_category: slot.category().to_string(),
            allow_broad,
        };
        Ok((
            EntityResolver::new(
                chebi_matches,
                chebi_synonyms,
                options(Slot::Chemical, false),
                sentinels.clone(),
            ),
            EntityResolver::new(
                go_matches,
                go_synonyms,
                options(Slot::Pathway, true),
                sentinels.clone(),
            ),
        ))
    }
}

/// Read-only lookups shared by every row.
struct RowResolvers<'a> {
    chemicals: &'a EntityResolver,
    pathways: &'a EntityResolver,
    environments: &'a EnvironmentTable,
    metabolism: &'a MetabolismTable,
    sentinels: &'a Sentinels,
}

impl RowResolvers<'_> {
    /// Resolve every slot of `row`, then emit its nodes followed by its edges.
    fn process_row<W: Write>(&self, row: &TraitRow, state: &mut RunState<W>) -> Result<()> {
        if self.sentinels.is_not_applicable(&row.tax_id) {
            warn!(org_name = %row.org_name, "Skipping row without a taxonomy id");
            state.rows_skipped += 1;
            return Ok(());
        }
        state.rows_processed += 1;

        let organism = GraphNode::new(
            format!("{}{}", NCBI_TAXON, row.tax_id),
            &row.org_name,
            Slot::Organism.category(),
            "",
        );

        let mut resolved: Vec<(Slot, GraphNode)> = Vec::new();
        for term in &row.carbon_substrates {
            for r in self.chemicals.resolve(term, &row.tax_id, &mut state.chebi_remnants) {
                let description = r.match_description();
                resolved.push((Slot::Chemical, GraphNode::new(r.id, term, r.category, description)));
            }
        }
        if let Some(node) = self.shape_node(row) {
            resolved.push((Slot::Shape, node));
        }
        for term in &row.isolation_sources {
            if let Some(node) = self.source_node(term) {
                resolved.push((Slot::Source, node));
            }
        }
        if let Some(node) = self.metabolism_node(row) {
            resolved.push((Slot::Metabolism, node));
        }
        for term in &row.pathways {
            for r in self.pathways.resolve(term, &row.tax_id, &mut state.go_remnants) {
                let description = r.match_description();
                resolved.push((Slot::Pathway, GraphNode::new(r.id, term, r.category, description)));
            }
        }

        if state.graph.emit_node(&organism)? && organism.id.starts_with(NCBI_TAXON) {
            writeln!(state.terms, "{}", organism.id)?;
            state.organisms += 1;
        }
        for (_, node) in &resolved {
            state.graph.emit_node(node)?;
        }
        for (slot, node) in &resolved {
            if let Some((predicate, relation)) = slot.edge() {
                let edge = GraphEdge::new(&organism.id, predicate, &node.id, relation);
                state.graph.emit_edge(&edge)?;
            }
        }
        Ok(())
    }

    fn shape_node(&self, row: &TraitRow) -> Option<GraphNode> {
        let shape = row.cell_shape.trim();
        if self.sentinels.is_not_applicable(shape) {
            return None;
        }
        Some(GraphNode::new(
            format!("{}{}", Slot::Shape.prefix(), shape.to_lowercase()),
            shape,
            Slot::Shape.category(),
            "",
        ))
    }

    fn source_node(&self, term: &str) -> Option<GraphNode> {
        if self.sentinels.is_not_applicable(term) {
            return None;
        }
        let (id, name) = self.environments.lookup(term).unwrap_or_else(|| {
            let collapsed = collapse_term(term);
            (
                format!("{}{}", Slot::Source.prefix(), collapsed.to_lowercase()),
                collapsed.to_string(),
            )
        });
        let category = if id.starts_with(CHEBI) {
            CHEMICAL_SUBSTANCE
        } else {
            Slot::Source.category()
        };
        Some(GraphNode::new(id, name, category, ""))
    }

    fn metabolism_node(&self, row: &TraitRow) -> Option<GraphNode> {
        if self.sentinels.is_not_applicable(&row.metabolism) {
            return None;
        }
        let entry = self.metabolism.lookup(row.metabolism.trim())?;
        Some(GraphNode::new(
            &entry.id,
            &entry.preferred_label,
            Slot::Metabolism.category(),
            "",
        ))
    }
}
