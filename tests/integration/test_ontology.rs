//! Ontology conversion through external commands.

use std::fs;

use kg_microbe::error::{KgError, OntologyError};
use kg_microbe::ontology::{CommandConverter, CommandTemplate, OntologyPipeline, ONTOLOGIES};

use crate::common::Fixture;

fn seed_ontologies(fixture: &Fixture) {
    for source in ONTOLOGIES.iter() {
        fs::write(fixture.input(source.file), "{\"graphs\": []}").unwrap();
    }
}

#[cfg(unix)]
#[test]
fn test_command_converter_writes_outputs() {
    let fixture = Fixture::new(false);
    seed_ontologies(&fixture);

    // Stand-in converter: copy the JSON to "<output>_nodes.<format>".
    let template = CommandTemplate::new(
        ["sh", "-c", "cp \"$0\" \"$1_nodes.$2\"", "{input}", "{output}", "{format}"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    let pipeline = OntologyPipeline::new(
        fixture.config.paths.input_dir(),
        fixture.config.paths.output_dir(),
        CommandConverter::new(template, "tsv"),
    );

    let outcomes = pipeline.run(None).unwrap();
    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes {
        let produced = pipeline
            .output_dir()
            .join(format!("{}_nodes.tsv", outcome.name));
        assert!(produced.is_file(), "missing {}", produced.display());
    }
    assert!(pipeline.output_dir().ends_with("ontologies"));
}

#[cfg(unix)]
#[test]
fn test_failing_converter_reports_name() {
    let fixture = Fixture::new(false);
    seed_ontologies(&fixture);

    let template = CommandTemplate::new(vec!["false".to_string()]);
    let pipeline = OntologyPipeline::new(
        fixture.config.paths.input_dir(),
        fixture.config.paths.output_dir(),
        CommandConverter::new(template, "tsv"),
    );

    let err = pipeline.run(Some("go.json")).unwrap_err();
    assert!(matches!(
        err,
        KgError::Ontology(OntologyError::Converter { ref name, .. }) if name == "go"
    ));
}

#[test]
fn test_missing_ontology_file() {
    let fixture = Fixture::new(false);
    let pipeline = OntologyPipeline::new(
        fixture.config.paths.input_dir(),
        fixture.config.paths.output_dir(),
        CommandConverter::from_config(&fixture.config.ontology),
    );

    let err = pipeline.run(Some("hp.json")).unwrap_err();
    assert!(matches!(err, KgError::MissingInput(ref p) if p.ends_with("hp.json")));
}
