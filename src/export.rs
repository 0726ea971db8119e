// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use serde_json::json;

use crate::ast::Node;
use crate::config::ModeConfig;
use crate::parser::Parser;
use crate::ModeError;

/// Convert a node tree to a JSON value.
///
/// Scalars stay strings (the format has no typed scalars), mappings keep
/// their key order and null maps to JSON null.
pub fn node_to_json(node: &Node) -> serde_json::Value {
    match node {
        Node::Null => serde_json::Value::Null,
        Node::Scalar(s) => json!(s),
        Node::Sequence(items) => json!(items.iter().map(node_to_json).collect::<Vec<_>>()),
        Node::Map(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), node_to_json(v)))
                .collect(),
        ),
    }
}

fn to_pretty(value: &impl serde::Serialize) -> Result<String, ModeError> {
    serde_json::to_string_pretty(value).map_err(|e| ModeError::RuntimeError {
        message: format!("Failed to serialize JSON: {}", e),
        hint: None,
        code: Some(500),
    })
}

/// Export a node tree as pretty-printed JSON.
pub fn export_node_to_json(node: &Node) -> Result<String, ModeError> {
    to_pretty(&node_to_json(node))
}

/// Export the records of a loaded config as pretty-printed JSON.
///
/// ```ignore
/// let config = ModeConfig::from_file("modegroup.yaml")?;
/// println!("{}", export_config_to_json(&config)?);
/// ```
pub fn export_config_to_json(config: &ModeConfig) -> Result<String, ModeError> {
    to_pretty(config)
}

/// Read, parse and export a file in one call.
pub fn export_file<P: AsRef<Path>>(path: P) -> Result<String, ModeError> {
    let doc = Parser::new().parse_file(path)?;
    export_node_to_json(&doc)
}
