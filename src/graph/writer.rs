//! Deduplicating writer for `nodes.tsv` / `edges.tsv`.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::types::{EmissionState, GraphEdge, GraphNode, EDGE_HEADER, NODE_HEADER};
use crate::error::Result;
use crate::utils::Sentinels;

/// File name of the node table.
pub const NODES_FILE: &str = "nodes.tsv";
/// File name of the edge table.
pub const EDGES_FILE: &str = "edges.tsv";

/// Counts reported when a writer is finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphCounts {
    pub nodes: usize,
    pub edges: usize,
    pub skipped_nodes: usize,
    pub skipped_edges: usize,
}

/// Writes nodes and edges exactly once each.
///
/// A node is written when its id is non-empty, not unknown and unseen. An
/// edge is written when its object is not unknown, both endpoints were
/// emitted earlier by this writer, and its (predicate, subject, object) key
/// is unseen.
pub struct GraphWriter<W: Write> {
    nodes: W,
    edges: W,
    state: EmissionState,
    sentinels: Sentinels,
    counts: GraphCounts,
}

impl GraphWriter<BufWriter<File>> {
    /// Create `nodes.tsv` and `edges.tsv` in `dir`, creating the directory if needed.
    pub fn create(dir: impl AsRef<Path>, sentinels: Sentinels) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let (nodes_path, edges_path) = output_paths(dir);
        debug!(nodes = %nodes_path.display(), edges = %edges_path.display(), "Opening graph output");

        let nodes = BufWriter::new(File::create(&nodes_path)?);
        let edges = BufWriter::new(File::create(&edges_path)?);
        Self::new(nodes, edges, sentinels)
    }
}

/// Paths of the node and edge tables inside `dir`.
pub fn output_paths(dir: &Path) -> (PathBuf, PathBuf) {
    (dir.join(NODES_FILE), dir.join(EDGES_FILE))
}

impl<W: Write> GraphWriter<W> {
    /// Wrap two sinks and write the headers.
    pub fn new(mut nodes: W, mut edges: W, sentinels: Sentinels) -> Result<Self> {
        write_row(&mut nodes, &NODE_HEADER)?;
        write_row(&mut edges, &EDGE_HEADER)?;
        Ok(Self {
            nodes,
            edges,
            state: EmissionState::new(),
            sentinels,
            counts: GraphCounts::default(),
        })
    }

    pub fn state(&self) -> &EmissionState {
        &self.state
    }

    /// Write `node` unless it is empty, unknown or already written.
    pub fn emit_node(&mut self, node: &GraphNode) -> Result<bool> {
        if node.id.is_empty() || self.sentinels.is_unknown(&node.id) {
            trace!(id = %node.id, "Skipping unusable node id");
            self.counts.skipped_nodes += 1;
            return Ok(false);
        }
        if !self.state.mark_node(&node.id) {
            return Ok(false);
        }

        write_row(&mut self.nodes, &node.fields())?;
        self.counts.nodes += 1;
        Ok(true)
    }

    /// Write `edge` unless it is unknown, dangling or already written.
    pub fn emit_edge(&mut self, edge: &GraphEdge) -> Result<bool> {
        if self.sentinels.is_unknown(&edge.object) {
            self.counts.skipped_edges += 1;
            return Ok(false);
        }
        if !self.state.has_node(&edge.subject) || !self.state.has_node(&edge.object) {
            debug!(
                subject = %edge.subject,
                object = %edge.object,
                "Refusing edge with unemitted endpoint"
            );
            self.counts.skipped_edges += 1;
            return Ok(false);
        }
        if !self.state.mark_edge(edge.key()) {
            return Ok(false);
        }

        write_row(&mut self.edges, &edge.fields())?;
        self.counts.edges += 1;
        Ok(true)
    }

    /// Flush both sinks and return the counts.
    pub fn finish(mut self) -> Result<GraphCounts> {
        self.nodes.flush()?;
        self.edges.flush()?;
        debug!(nodes = self.counts.nodes, edges = self.counts.edges, "Graph output flushed");
        Ok(self.counts)
    }
}

/// Write one TSV row. Tabs and line breaks inside a field become spaces.
fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> Result<()> {
    let cells: Vec<Cow<'_, str>> = fields.iter().map(|f| clean_field(f)).collect();
    writeln!(out, "{}", cells.join("\t"))?;
    Ok(())
}

fn clean_field(field: &str) -> Cow<'_, str> {
    if field.contains(['\t', '\r', '\n']) {
        Cow::Owned(field.replace(['\t', '\r', '\n'], " "))
    } else {
        Cow::Borrowed(field)
    }
}
