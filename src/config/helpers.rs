use indexmap::IndexMap;

use crate::ast::Node;

/// Scalar items of a list node. Non-scalar items are skipped.
pub(super) fn scalar_list(node: &Node) -> Vec<String> {
    Vec::<String>::try_from(node).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "list holds non-scalar items, keeping the scalars");
        node.as_sequence()
            .map(|items| items.iter().filter_map(Node::as_str).map(String::from).collect())
            .unwrap_or_default()
    })
}

/// Collects settings pairs into `settings`.
///
/// Accepted shapes:
/// - `- key: k` with `value: v` in the same sequence item
/// - `- k: v` sequence items
/// - a mapping of `k: v` lines, or of `key:`/`value:` lines in turn
///
/// A `value` fills the latest `key` of the same mapping; with no such key
/// it is ignored.
pub(super) fn collect_settings(node: &Node, settings: &mut IndexMap<String, String>) {
    match node {
        Node::Sequence(items) => {
            for item in items {
                collect_entry(item, settings);
            }
        }
        Node::Map(_) => collect_entry(node, settings),
        Node::Null | Node::Scalar(_) => {}
    }
}

fn collect_entry(entry: &Node, settings: &mut IndexMap<String, String>) {
    let Some(entries) = entry.as_map() else {
        return;
    };

    let mut staged: Option<&str> = None;
    for (key, value) in entries.occurrences() {
        match (key, value) {
            ("key", _) => {
                staged = Some(value.text()).filter(|k| !k.is_empty());
                if let Some(staged) = staged {
                    settings.insert(staged.to_string(), String::new());
                }
            }
            ("value", _) => match staged {
                Some(staged) => {
                    settings.insert(staged.to_string(), value.text().to_string());
                }
                None => tracing::debug!("settings value without a key"),
            },
            (_, Node::Scalar(text)) => {
                settings.insert(key.to_string(), text.clone());
            }
            (_, Node::Null) => {
                settings.insert(key.to_string(), String::new());
            }
            (_, Node::Sequence(_) | Node::Map(_)) => {}
        }
    }
}
