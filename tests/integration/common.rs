//! Shared fixtures.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use kg_microbe::Config;

pub const TRAITS_HEADER: &str =
    "tax_id,org_name,metabolism,pathways,shape,carbon_substrates,cell_shape,isolation_source\n";
pub const NER_HEADER: &str = "TaxId\tTokenizedTerm\tCURIE\tBiolink\tStringMatch\n";
pub const SSSOM_HEADER: &str =
    "subject_label\tobject_id\tobject_label\tobject_match_field\tmatch_category\n";
pub const ENV_HEADER: &str = "Type,ENVO_terms,ENVO_ids\n";

/// Temporary data layout rooted in a tempdir.
pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub config: Config,
}

impl Fixture {
    pub fn new(nlp: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let mut config = Config::default();
        config.paths.input_dir = root.join("raw").display().to_string();
        config.paths.output_dir = root.join("transformed").display().to_string();
        config.paths.nlp_dir = root.join("nlp").display().to_string();
        config.traits.nlp = nlp;

        fs::create_dir_all(config.paths.input_dir()).unwrap();
        fs::create_dir_all(config.paths.nlp_output_dir()).unwrap();
        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn input(&self, name: &str) -> PathBuf {
        self.config.paths.input_dir().join(name)
    }

    /// Write the trait table (header added) and an environment table.
    pub fn traits(&self, rows: &str, environments: &str) -> &Self {
        fs::write(
            self.input(&self.config.traits.data_file),
            format!("{}{}", TRAITS_HEADER, rows),
        )
        .unwrap();
        fs::write(
            self.input(&self.config.traits.environment_file),
            format!("{}{}", ENV_HEADER, environments),
        )
        .unwrap();
        self
    }

    /// Write NER outputs and SSSOM tables (headers added).
    pub fn ner(&self, chebi: &str, go: &str, chebi_sssom: &str, go_sssom: &str) -> &Self {
        let nlp = self.config.paths.nlp_output_dir();
        let traits = &self.config.traits;
        fs::write(nlp.join(&traits.chebi_matches), format!("{}{}", NER_HEADER, chebi)).unwrap();
        fs::write(nlp.join(&traits.go_matches), format!("{}{}", NER_HEADER, go)).unwrap();
        fs::write(
            self.input(&traits.chebi_sssom),
            format!("# curie_map: {{}}\n{}{}", SSSOM_HEADER, chebi_sssom),
        )
        .unwrap();
        fs::write(self.input(&traits.go_sssom), format!("{}{}", SSSOM_HEADER, go_sssom)).unwrap();
        self
    }
}

/// Parsed `nodes.tsv` / `edges.tsv` rows, header excluded.
pub struct Graph {
    pub nodes: Vec<Vec<String>>,
    pub edges: Vec<Vec<String>>,
}

impl Graph {
    pub fn read(dir: &Path) -> Self {
        let rows = |file: &str| -> Vec<Vec<String>> {
            fs::read_to_string(dir.join(file))
                .unwrap()
                .lines()
                .skip(1)
                .map(|l| l.split('\t').map(str::to_string).collect())
                .collect()
        };
        Self {
            nodes: rows("nodes.tsv"),
            edges: rows("edges.tsv"),
        }
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n[0].as_str()).collect()
    }

    pub fn node(&self, id: &str) -> Option<&Vec<String>> {
        self.nodes.iter().find(|n| n[0] == id)
    }

    /// (subject, predicate, object) triples.
    pub fn triples(&self) -> Vec<(&str, &str, &str)> {
        self.edges
            .iter()
            .map(|e| (e[0].as_str(), e[1].as_str(), e[2].as_str()))
            .collect()
    }

    /// Node ids are unique and no edge points outside the node set.
    pub fn assert_well_formed(&self, unknown_suffix: &str) {
        let ids: HashSet<&str> = self.node_ids().into_iter().collect();
        assert_eq!(ids.len(), self.nodes.len(), "duplicate node ids");
        for id in &ids {
            assert!(!id.to_ascii_lowercase().ends_with(unknown_suffix), "unknown id {}", id);
        }
        for (subject, _, object) in self.triples() {
            assert!(ids.contains(subject), "dangling subject {}", subject);
            assert!(ids.contains(object), "dangling object {}", object);
        }
        let keys: HashSet<_> = self.triples().into_iter().collect();
        assert_eq!(keys.len(), self.edges.len(), "duplicate edges");
    }
}
