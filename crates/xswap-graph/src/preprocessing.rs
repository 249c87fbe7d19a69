//! Loading, writing and integer-mapping of edge lists stored as delimited text.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use xswap_core::errors::{ErrorInfo, XswapError};
use xswap_core::{Edge, NodeId};

/// String edges mapped onto dense integer identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedEdges {
    /// Edges rewritten with integer identifiers, in input order.
    pub edges: Vec<Edge>,
    /// Original source name to integer identifier.
    pub source_mapping: BTreeMap<String, NodeId>,
    /// Original target name to integer identifier.
    pub target_mapping: BTreeMap<String, NodeId>,
}

/// Loads `(source, target)` name pairs from a delimited file without a header.
///
/// Rows with fewer than two fields are skipped; fields past the second are ignored.
pub fn load_str_edges(path: &Path, delimiter: u8) -> Result<Vec<(String, String)>, XswapError> {
    Ok(read_rows(path, delimiter)?
        .into_iter()
        .map(|(_, source, target)| (source, target))
        .collect())
}

/// Loads a comma separated edge list whose names are already integer identifiers.
pub fn load_processed_edges(path: &Path) -> Result<Vec<Edge>, XswapError> {
    read_rows(path, b',')?
        .into_iter()
        .map(|(line, source, target)| {
            Ok(Edge::new(
                parse_node(&source, line, path)?,
                parse_node(&target, line, path)?,
            ))
        })
        .collect()
}

/// Rows with at least two fields, tagged with their 1-based line in the file.
fn read_rows(path: &Path, delimiter: u8) -> Result<Vec<(u64, String, String)>, XswapError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|err| csv_error("csv-open", path, err))?;
    let mut rows = Vec::new();
    for (ordinal, record) in reader.records().enumerate() {
        let record = record.map_err(|err| csv_error("csv-read", path, err))?;
        if let (Some(source), Some(target)) = (record.get(0), record.get(1)) {
            let line = record
                .position()
                .map_or(ordinal as u64 + 1, |position| position.line());
            rows.push((line, source.to_string(), target.to_string()));
        }
    }
    Ok(rows)
}

/// Writes edges as comma separated `source,target` rows.
pub fn write_edges(path: &Path, edges: &[Edge]) -> Result<(), XswapError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|err| csv_error("csv-create", path, err))?;
    for edge in edges {
        writer
            .serialize((edge.source, edge.target))
            .map_err(|err| csv_error("csv-write", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| io_error("csv-flush", path, err))
}

/// Writes a name mapping with an `original,mapped` header.
pub fn write_mapping(path: &Path, mapping: &BTreeMap<String, NodeId>) -> Result<(), XswapError> {
    let mut writer = csv::Writer::from_path(path).map_err(|err| csv_error("csv-create", path, err))?;
    writer
        .write_record(["original", "mapped"])
        .map_err(|err| csv_error("csv-write", path, err))?;
    for (original, mapped) in mapping {
        writer
            .write_record([original.as_str(), mapped.to_string().as_str()])
            .map_err(|err| csv_error("csv-write", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| io_error("csv-flush", path, err))
}

/// Maps string edges to integer identifiers assigned in sorted name order.
///
/// With `bipartite` the source and target roles get separate mappings, so `("1", "1")`
/// connects two distinct nodes. Otherwise one mapping covers both roles and the same
/// edge becomes a self-loop.
pub fn map_str_edges(edges: &[(String, String)], bipartite: bool) -> MappedEdges {
    let sources = edges.iter().map(|(source, _)| source.as_str());
    let targets = edges.iter().map(|(_, target)| target.as_str());
    let (source_mapping, target_mapping) = if bipartite {
        (sorted_mapping(sources), sorted_mapping(targets))
    } else {
        let shared = sorted_mapping(sources.chain(targets));
        (shared.clone(), shared)
    };
    let edges = edges
        .iter()
        .map(|(source, target)| Edge::new(source_mapping[source], target_mapping[target]))
        .collect();
    MappedEdges {
        edges,
        source_mapping,
        target_mapping,
    }
}

fn sorted_mapping<'a>(names: impl Iterator<Item = &'a str>) -> BTreeMap<String, NodeId> {
    let unique: BTreeSet<&str> = names.collect();
    unique
        .into_iter()
        .enumerate()
        .map(|(id, name)| (name.to_string(), id as NodeId))
        .collect()
}

fn parse_node(value: &str, line: u64, path: &Path) -> Result<NodeId, XswapError> {
    value.trim().parse::<NodeId>().map_err(|err| {
        XswapError::Input(
            ErrorInfo::new("invalid-node-id", err.to_string())
                .with_context("value", value)
                .with_context("line", line)
                .with_context("path", path.display()),
        )
    })
}

fn csv_error(code: &str, path: &Path, err: csv::Error) -> XswapError {
    XswapError::Serde(ErrorInfo::new(code, err.to_string()).with_context("path", path.display()))
}

fn io_error(code: &str, path: &Path, err: std::io::Error) -> XswapError {
    XswapError::Serde(ErrorInfo::new(code, err.to_string()).with_context("path", path.display()))
}
