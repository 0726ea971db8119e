// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;

use crate::ast::{is_truthy, Node};
use crate::ModeError;

fn kind(node: &Node) -> &'static str {
    match node {
        Node::Null => "null",
        Node::Scalar(_) => "scalar",
        Node::Sequence(_) => "sequence",
        Node::Map(_) => "mapping",
    }
}

fn type_error(expected: &str, node: &Node, hint: &str, code: u32) -> ModeError {
    ModeError::TypeError {
        message: format!("Expected {}, got {}", expected, kind(node)),
        line: 0,
        column: 0,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

impl TryFrom<&Node> for String {
    type Error = ModeError;

    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        match node {
            Node::Scalar(s) => Ok(s.clone()),
            _ => Err(type_error("scalar", node, "Use a plain or quoted value", 401)),
        }
    }
}

impl TryFrom<&Node> for bool {
    type Error = ModeError;

    /// `true`, `yes` and `1` are true, any other scalar is false.
    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        match node {
            Node::Scalar(s) => Ok(is_truthy(s)),
            _ => Err(type_error("boolean", node, "Use true, yes or 1", 402)),
        }
    }
}

impl TryFrom<&Node> for i64 {
    type Error = ModeError;

    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        match node {
            Node::Scalar(s) => s.trim().parse::<i64>().map_err(|_| ModeError::TypeError {
                message: format!("Invalid integer '{}'", s),
                line: 0,
                column: 0,
                hint: Some("Use a whole number".into()),
                code: Some(403),
            }),
            _ => Err(type_error("integer", node, "Use a whole number", 403)),
        }
    }
}

impl TryFrom<&Node> for Vec<String> {
    type Error = ModeError;

    /// A sequence of scalars. A lone scalar is a one-element list and null is
    /// an empty one.
    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        match node {
            Node::Null => Ok(Vec::new()),
            Node::Scalar(s) => Ok(vec![s.clone()]),
            Node::Sequence(items) => items.iter().map(String::try_from).collect(),
            Node::Map(_) => Err(type_error("sequence", node, "List items with '- '", 404)),
        }
    }
}

impl TryFrom<&Node> for IndexMap<String, String> {
    type Error = ModeError;

    /// A mapping whose values are all scalars (null becomes an empty string).
    fn try_from(node: &Node) -> Result<Self, Self::Error> {
        match node {
            Node::Null => Ok(IndexMap::new()),
            Node::Map(entries) => entries
                .iter()
                .map(|(key, value)| {
                    let value = match value {
                        Node::Null => String::new(),
                        other => String::try_from(other)?,
                    };
                    Ok((key.to_string(), value))
                })
                .collect(),
            _ => Err(type_error("mapping", node, "Use 'key: value' lines", 405)),
        }
    }
}

impl Node {
    /// Typed lookup through a dotted path.
    ///
    /// ```ignore
    /// let port: i64 = doc.get_as("server.port")?;
    /// ```
    pub fn get_as<'n, T>(&'n self, path: &str) -> Result<T, ModeError>
    where
        T: TryFrom<&'n Node, Error = ModeError>,
    {
        let node = self.lookup(path).ok_or_else(|| ModeError::PathNotFound {
            path: path.to_string(),
            hint: Some("Check that the path exists in your config file".into()),
            code: Some(304),
        })?;
        T::try_from(node)
    }
}
