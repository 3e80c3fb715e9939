//! Output formatting for CLI commands.
//!
//! This module handles formatting output as either JSON or human-readable text.

use anyhow::Result;
use serde::Serialize;

use kg_microbe::ontology::OntologyOutcome;
use kg_microbe::termlist::TermlistSummary;
use kg_microbe::traits::TransformSummary;
use kg_microbe::Config;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print trait transform summary.
pub fn print_transform_summary(summary: &TransformSummary, json: bool) -> Result<()> {
    if json {
        return print_json(summary);
    }

    println!("Transformed {} ({} rows)", summary.source_name, summary.rows_processed);
    if summary.rows_skipped > 0 {
        println!("Skipped rows: {}", summary.rows_skipped);
    }
    println!("Output: {}", summary.output_dir.display());
    println!("Nodes written: {}", summary.nodes_written);
    println!("Edges written: {}", summary.edges_written);
    println!("Organisms: {}", summary.organisms);
    if summary.nlp {
        println!(
            "Remnants: {} CHEBI, {} GO",
            summary.chebi_remnants, summary.go_remnants
        );
    } else {
        println!("NLP: disabled");
    }
    if let Some(subset) = &summary.subset_output {
        println!("Subset: {}", subset.display());
    }
    println!("nodes.tsv sha256: {}", summary.nodes_sha256);
    println!("edges.tsv sha256: {}", summary.edges_sha256);
    println!("Took {}ms", summary.duration_ms());
    Ok(())
}

/// Print ontology conversion results.
pub fn print_ontology_outcomes(outcomes: &[OntologyOutcome], json: bool) -> Result<()> {
    if json {
        return print_json(outcomes);
    }

    println!("Converted {} ontologies\n", outcomes.len());
    for outcome in outcomes {
        println!("  {}", outcome.name);
        println!("    Input:  {}", outcome.input.display());
        println!("    Output: {}", outcome.output_prefix.display());
    }
    Ok(())
}

/// Print term list conversion result.
pub fn print_termlist_summary(summary: &TermlistSummary, json: bool) -> Result<()> {
    if json {
        return print_json(summary);
    }

    println!("Wrote {} term rows for {} nodes", summary.rows_written, summary.nodes);
    if summary.skipped_excluded > 0 || summary.skipped_unnamed > 0 {
        println!(
            "Skipped: {} excluded, {} without name",
            summary.skipped_excluded, summary.skipped_unnamed
        );
    }
    Ok(())
}

/// Print the effective configuration.
pub fn print_config(config: &Config, json: bool) -> Result<()> {
    if json {
        return print_json(config);
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
