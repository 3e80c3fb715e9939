//! End-to-end trait transform tests.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use kg_microbe::error::{KgError, ParseError};
use kg_microbe::ontology::{NoopExtractor, SubsetExtractor};
use kg_microbe::traits::{TraitsPipeline, CHEBI_REMNANTS_FILE, GO_REMNANTS_FILE, SUBSET_TERMS_FILE};

use crate::common::{Fixture, Graph};

fn run(fixture: &Fixture) -> (kg_microbe::TransformSummary, Graph, PathBuf) {
    let pipeline =
        TraitsPipeline::new(fixture.config.clone()).with_extractor(Box::new(NoopExtractor));
    let summary = pipeline.run().unwrap();
    let out = pipeline.output_dir();
    (summary, Graph::read(&out), out)
}

#[test]
fn test_exact_match_and_fallback() {
    let fixture = Fixture::new(true);
    fixture
        .traits("561,Escherichia coli,NA,NA,NA,\"glucose, lactose\",NA,NA\n", "")
        .ner(
            "561\tglucose\tCHEBI:17234\tbiolink:ChemicalSubstance\tExact\n",
            "",
            "",
            "",
        );

    let (summary, graph, _) = run(&fixture);

    assert_eq!(
        graph.node_ids(),
        vec![
            "NCBITaxon:561",
            "CHEBI:17234",
            "microtraits.carbon_substrates:lactose"
        ]
    );
    assert_eq!(graph.node("CHEBI:17234").unwrap()[3], "ExactStringMatch");
    assert_eq!(graph.node("microtraits.carbon_substrates:lactose").unwrap()[3], "");
    assert_eq!(
        graph.triples(),
        vec![
            ("NCBITaxon:561", "biolink:interacts_with", "CHEBI:17234"),
            (
                "NCBITaxon:561",
                "biolink:interacts_with",
                "microtraits.carbon_substrates:lactose"
            ),
        ]
    );
    assert!(graph.edges.iter().all(|e| e[3] == "RO:0002438"));
    assert_eq!(summary.chebi_remnants, 0);
    graph.assert_well_formed(":na");
}

#[test]
fn test_exact_wins_over_synonyms() {
    let fixture = Fixture::new(true);
    fixture
        .traits("561,Escherichia coli,NA,NA,NA,glucose,NA,NA\n", "")
        .ner(
            "561\tglucose\tCHEBI:4167\tbiolink:ChemicalSubstance\tPartial\n\
             561\tglucose\tCHEBI:17234\tbiolink:ChemicalSubstance\tExact\n",
            "",
            "glucose\tCHEBI:4167\tD-glucopyranose\toio:hasExactSynonym\tSSSOM:Lexical\n",
            "",
        );

    let (_, graph, _) = run(&fixture);
    assert_eq!(graph.node_ids(), vec!["NCBITaxon:561", "CHEBI:17234"]);
}

#[test]
fn test_related_synonyms_fan_out() {
    let fixture = Fixture::new(true);
    fixture
        .traits("561,Escherichia coli,NA,NA,NA,sugar,NA,NA\n", "")
        .ner(
            "561\tsugar\tCHEBI:16646\tbiolink:ChemicalSubstance\tPartial\n\
             561\tsugar\tCHEBI:35381\tbiolink:ChemicalSubstance\tPartial\n",
            "",
            "sugar\tCHEBI:16646\tcarbohydrate\toio:hasRelatedSynonym\tSSSOM:Lexical\n\
             sugar\tCHEBI:35381\tmonosaccharide\toio:hasRelatedSynonym\tSSSOM:Lexical\n",
            "",
        );

    let (summary, graph, _) = run(&fixture);
    assert_eq!(summary.nodes_written, 3);
    assert_eq!(summary.edges_written, 2);
    for id in ["CHEBI:16646", "CHEBI:35381"] {
        let node = graph.node(id).unwrap();
        assert_eq!(node[1], "sugar");
        assert_eq!(node[3], "oio:hasRelatedSynonym");
    }
    graph.assert_well_formed(":na");
}

#[test]
fn test_unranked_candidates_become_remnants() {
    let fixture = Fixture::new(true);
    fixture
        .traits(
            "561,Escherichia coli,NA,tricarboxylic_acid_cycle,NA,peptone,NA,NA\n",
            "",
        )
        .ner(
            "561\tpeptone\tCHEBI:99\tbiolink:ChemicalSubstance\tPartial\n",
            "561\ttricarboxylic acid cycle\tGO:0006099\tbiolink:BiologicalProcess\tPartial\n",
            "peptone\tCHEBI:99\tpeptone\toio:hasNarrowSynonym\tSSSOM:Lexical\n",
            "tricarboxylic_acid_cycle\tGO:0006099\tTCA cycle\toio:hasBroadSynonym\tSSSOM:Lexical\n",
        );

    let (summary, graph, _) = run(&fixture);

    assert!(graph.node("microtraits.carbon_substrates:peptone").is_some());
    assert_eq!(summary.chebi_remnants, 1);

    let pathway = graph.node("GO:0006099").unwrap();
    assert_eq!(pathway[1], "tricarboxylic acid cycle");
    assert_eq!(pathway[3], "oio:hasBroadSynonym");
    assert_eq!(summary.go_remnants, 0);

    let nlp = fixture.config.paths.nlp_output_dir();
    let remnants = fs::read_to_string(nlp.join(CHEBI_REMNANTS_FILE)).unwrap();
    assert_eq!(remnants.lines().count(), 2);
    assert!(remnants.contains("oio:hasNarrowSynonym"));
    assert_eq!(
        fs::read_to_string(nlp.join(GO_REMNANTS_FILE)).unwrap().lines().count(),
        1
    );
}

#[test]
fn test_isolation_sources() {
    let fixture = Fixture::new(false);
    fixture.traits(
        "561,Escherichia coli,NA,NA,NA,NA,NA,\"marine_sediment_surface, soil_sample, water_chebi\"\n",
        "soil_sample,\"soil, agricultural soil\",\"ENVO:00001998, ENVO:00002259\"\n\
         water_chebi,water,CHEBI:15377\n",
    );

    let (_, graph, _) = run(&fixture);

    let surface = graph.node("microtraits.data_source:surface").unwrap();
    assert_eq!(surface[1], "surface");
    assert_eq!(surface[2], "");

    let soil = graph.node("ENVO:00002259").unwrap();
    assert_eq!(soil[1], "agricultural soil");

    let water = graph.node("CHEBI:15377").unwrap();
    assert_eq!(water[2], "biolink:ChemicalSubstance");

    assert!(graph
        .triples()
        .iter()
        .all(|(_, predicate, _)| *predicate == "biolink:location_of"));
    assert_eq!(graph.edges.len(), 3);
}

#[test]
fn test_unmapped_source_keeps_spaces_in_id() {
    let fixture = Fixture::new(false);
    fixture.traits("561,E coli,NA,NA,NA,NA,NA,host_gut wall\n", "");

    let (_, graph, _) = run(&fixture);

    let source = graph.node("microtraits.data_source:gut wall").unwrap();
    assert_eq!(source[1], "gut wall");
    assert!(graph.node("microtraits.data_source:gut_wall").is_none());
    assert_eq!(
        graph.triples(),
        vec![(
            "NCBITaxon:561",
            "biolink:location_of",
            "microtraits.data_source:gut wall"
        )]
    );
    graph.assert_well_formed(":na");
}

#[test]
fn test_tab_in_cell_keeps_node_columns() {
    let fixture = Fixture::new(false);
    fixture.traits("561,E\tcoli,NA,NA,NA,NA,NA,NA\n", "");

    let (summary, graph, out) = run(&fixture);

    assert_eq!(summary.nodes_written, 1);
    assert_eq!(graph.node("NCBITaxon:561").unwrap()[1], "E coli");
    let text = fs::read_to_string(out.join("nodes.tsv")).unwrap();
    assert!(text.lines().all(|l| l.split('\t').count() == 4));
}

#[test]
fn test_shape_metabolism_and_unknown_ids() {
    let fixture = Fixture::new(false);
    fixture.traits(
        "561,Escherichia coli,aerobic,NA,rod,NA,Rod,NA\n\
         562,Escherichia albertii,strictly anaerobic,NA,na,NA,na,NA\n\
         563,Unclassified,lithotrophic,NA,NA,NA,NA,NA\n",
        "",
    );

    let (summary, graph, _) = run(&fixture);

    let shape = graph.node("microtraits.cell_shape_enum:rod").unwrap();
    assert_eq!(shape[1], "Rod");
    assert_eq!(shape[2], "biolink:AbstractEntity");
    assert!(graph.node("microtraits.cell_shape_enum:na").is_none());

    let aerobe = graph.node("ECOCORE:00000173").unwrap();
    assert_eq!(aerobe[1], "aerobe");
    assert_eq!(aerobe[2], "biolink:ActivityAndBehavior");
    assert!(graph.node("ECOCORE:00000172").is_some());

    assert!(graph.triples().contains(&(
        "NCBITaxon:561",
        "biolink:has_phenotype",
        "microtraits.cell_shape_enum:rod"
    )));
    assert!(graph.triples().contains(&(
        "NCBITaxon:562",
        "biolink:capable_of",
        "ECOCORE:00000172"
    )));
    assert_eq!(summary.organisms, 3);
    graph.assert_well_formed(":na");
}

#[test]
fn test_shared_nodes_written_once() {
    let fixture = Fixture::new(false);
    fixture.traits(
        "561,Escherichia coli,NA,NA,NA,glucose,rod,NA\n\
         562,Escherichia albertii,NA,NA,NA,glucose|glucose,rod,NA\n\
         561,Escherichia coli,NA,NA,NA,glucose,rod,NA\n",
        "",
    );

    let (summary, graph, out) = run(&fixture);

    assert_eq!(summary.rows_processed, 3);
    assert_eq!(summary.nodes_written, 4);
    assert_eq!(summary.edges_written, 4);
    assert_eq!(
        fs::read_to_string(out.join(SUBSET_TERMS_FILE)).unwrap(),
        "NCBITaxon:561\nNCBITaxon:562\n"
    );
    graph.assert_well_formed(":na");
}

#[test]
fn test_runs_are_idempotent() {
    let fixture = Fixture::new(true);
    fixture
        .traits(
            "561,Escherichia coli,facultative,glycolysis|tricarboxylic_acid_cycle,rod,\"glucose, lactose, sugar\",rod,host_gut\n\
             562,Escherichia albertii,aerobic,glycolysis,coccus,\"sugar, glucose\",coccus,marine_sediment_surface\n",
            "host_gut,intestine,UBERON:0000160\n",
        )
        .ner(
            "561\tglucose\tCHEBI:17234\tbiolink:ChemicalSubstance\tExact\n\
             561\tsugar\tCHEBI:16646\tbiolink:ChemicalSubstance\tPartial\n\
             561\tsugar\tCHEBI:35381\tbiolink:ChemicalSubstance\tPartial\n\
             562\tsugar\tCHEBI:16646\tbiolink:ChemicalSubstance\tPartial\n",
            "561\tglycolysis\tGO:0006096\tbiolink:BiologicalProcess\tExact\n",
            "sugar\tCHEBI:16646\tcarbohydrate\toio:hasRelatedSynonym\tSSSOM:Lexical\n\
             sugar\tCHEBI:35381\tmonosaccharide\toio:hasRelatedSynonym\tSSSOM:Lexical\n",
            "",
        );

    let (first, graph, out) = run(&fixture);
    let nodes = fs::read(out.join("nodes.tsv")).unwrap();
    let edges = fs::read(out.join("edges.tsv")).unwrap();

    let (second, _, _) = run(&fixture);
    assert_eq!(fs::read(out.join("nodes.tsv")).unwrap(), nodes);
    assert_eq!(fs::read(out.join("edges.tsv")).unwrap(), edges);
    assert_eq!(first.nodes_sha256, second.nodes_sha256);
    assert_eq!(first.edges_sha256, second.edges_sha256);

    assert!(graph.node("GO:0006096").is_some());
    assert!(graph.node("microtraits.pathways:glycolysis").is_some());
    graph.assert_well_formed(":na");
}

#[test]
fn test_malformed_row_aborts() {
    let fixture = Fixture::new(false);
    fixture.traits(
        "561,Escherichia coli,NA,NA,NA,glucose,rod,NA\n\
         562,Escherichia albertii,NA,NA,NA,glucose,lactose,rod,NA\n",
        "",
    );

    let pipeline = TraitsPipeline::new(fixture.config.clone()).with_extractor(Box::new(NoopExtractor));
    let err = pipeline.run().unwrap_err();
    assert!(matches!(
        err,
        KgError::Parse(ParseError::MalformedRow {
            line: 3,
            expected: 8,
            found: 9
        })
    ));
}

#[test]
fn test_missing_trait_table() {
    let fixture = Fixture::new(false);
    let pipeline = TraitsPipeline::new(fixture.config.clone());
    let err = pipeline.run().unwrap_err();
    assert!(matches!(err, KgError::MissingInput(ref p) if p.ends_with("condensed_traits_NCBI.csv")));
}

struct RecordingExtractor {
    calls: Rc<RefCell<Vec<String>>>,
}

impl SubsetExtractor for RecordingExtractor {
    fn extract(&self, terms_file: &Path, _output_dir: &Path) -> kg_microbe::Result<Option<PathBuf>> {
        self.calls
            .borrow_mut()
            .push(fs::read_to_string(terms_file)?);
        Ok(None)
    }
}

#[test]
fn test_subset_extractor_receives_organisms() {
    let fixture = Fixture::new(false);
    fixture.traits(
        "561,Escherichia coli,NA,NA,NA,NA,NA,NA\n\
         562,Escherichia albertii,NA,NA,NA,NA,NA,NA\n",
        "",
    );

    let calls = Rc::new(RefCell::new(Vec::new()));
    let pipeline = TraitsPipeline::new(fixture.config.clone()).with_extractor(Box::new(
        RecordingExtractor {
            calls: Rc::clone(&calls),
        },
    ));
    pipeline.run().unwrap();

    assert_eq!(*calls.borrow(), vec!["NCBITaxon:561\nNCBITaxon:562\n".to_string()]);
}

#[test]
fn test_fixture_root_is_isolated() {
    let fixture = Fixture::new(false);
    assert!(fixture.config.paths.input_dir().starts_with(fixture.root()));
}
