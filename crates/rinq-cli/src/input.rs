//! Edge-list loading.
//!
//! Headerless CSV, one edge per record: `a,b` (weight 1) or `a,b,weight`.
//! Lines starting with `#` are skipped. Nodes are numbered in order of first
//! appearance.

use anyhow::{bail, Context, Result};
use rinq_core::Adjacency;
use std::collections::HashSet;
use std::io::Read;

/// Parse an edge list into an [`Adjacency`].
pub fn read_edge_list<R: Read>(reader: R) -> Result<Adjacency> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut labels: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut edges: Vec<(String, String, f64)> = Vec::new();

    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("malformed record {}", line + 1))?;
        if record.len() < 2 || record.len() > 3 {
            bail!(
                "record {}: expected `a,b` or `a,b,weight`, got {} fields",
                line + 1,
                record.len()
            );
        }

        let weight = match record.get(2) {
            Some(w) => w
                .parse::<f64>()
                .with_context(|| format!("record {}: bad weight {w:?}", line + 1))?,
            None => 1.0,
        };

        for name in [&record[0], &record[1]] {
            if seen.insert(name.to_string()) {
                labels.push(name.to_string());
            }
        }
        edges.push((record[0].to_string(), record[1].to_string(), weight));
    }

    if labels.is_empty() {
        bail!("edge list is empty");
    }

    let adj = Adjacency::from_edges(labels, edges)?;
    tracing::debug!(nodes = adj.len(), edges = adj.edge_count(), "loaded edge list");
    Ok(adj)
}
