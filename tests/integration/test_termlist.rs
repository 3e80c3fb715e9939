//! Term list generation from transformed nodes.

use std::fs;

use kg_microbe::ontology::NoopExtractor;
use kg_microbe::termlist;
use kg_microbe::traits::TraitsPipeline;

use crate::common::Fixture;

#[test]
fn test_termlist_from_transform_output() {
    let fixture = Fixture::new(false);
    fixture.traits(
        "561,Escherichia coli,aerobic,NA,NA,\"glucose, lactose\",rod,NA\n",
        "",
    );

    let pipeline =
        TraitsPipeline::new(fixture.config.clone()).with_extractor(Box::new(NoopExtractor));
    pipeline.run().unwrap();

    let output = fixture.config.paths.nlp_terms_dir().join("traits_termlist.tsv");
    let summary = termlist::convert(pipeline.output_dir().join("nodes.tsv"), &output).unwrap();

    assert_eq!(summary.nodes, 5);
    let text = fs::read_to_string(&output).unwrap();
    assert!(text
        .lines()
        .all(|l| l.starts_with("CUI-less\tN/A\t") && l.split('\t').count() == 6));
    assert!(text.contains("ECOCORE:00000173\taerobe\taerobe\tbiolink:ActivityAndBehavior"));
}
