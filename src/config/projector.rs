use super::helpers::{collect_settings, scalar_list};
use super::*;
use crate::ast::Mapping;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    ModeGroups,
    Plugins,
}

/// The record the fields of the current block attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    None,
    Group(usize),
    Plugin(usize),
}

#[derive(Default)]
struct Projection {
    groups: Vec<ModeGroupRecord>,
    plugins: Vec<PluginRecord>,
}

pub(super) fn project(root: &Node) -> (Vec<ModeGroupRecord>, Vec<PluginRecord>) {
    let mut projection = Projection::default();
    projection.find_sections(root);
    (projection.groups, projection.plugins)
}

impl Section {
    /// The key that starts each record of a block: the section's own
    /// discriminator (`name` for groups, `file` for plugins), or the other
    /// one when the block has none of its own.
    fn discriminator(self, entries: &Mapping) -> Option<&'static str> {
        let (own, other) = match self {
            Section::ModeGroups => ("name", "file"),
            Section::Plugins => ("file", "name"),
        };
        [own, other].into_iter().find(|key| entries.contains_key(key))
    }
}

impl Projection {
    /// Sections may sit at the top level or inside any enclosing mapping.
    fn find_sections(&mut self, node: &Node) {
        let Some(entries) = node.as_map() else {
            return;
        };

        for (key, value) in entries.occurrences() {
            match key {
                "modegroups" => self.section(value, Section::ModeGroups),
                "plugins" => self.section(value, Section::Plugins),
                _ if value.is_map() => self.find_sections(value),
                _ => tracing::debug!(key = %key, "skipping key outside any section"),
            }
        }
    }

    fn section(&mut self, node: &Node, section: Section) {
        match node {
            Node::Sequence(items) => {
                for item in items {
                    self.block(item, section);
                }
            }
            Node::Map(_) => self.block(node, section),
            Node::Null | Node::Scalar(_) => {}
        }
    }

    /// Splits a mapping into records, in the order its entries were written.
    /// Each discriminator starts a record and the entries after it are its
    /// fields; entries written before the first one belong to the first
    /// record. A mapping with no record recurses into its nested blocks.
    fn block(&mut self, node: &Node, section: Section) {
        let Some(entries) = node.as_map() else {
            return;
        };

        let Some(discriminator) = section.discriminator(entries) else {
            self.nested_blocks(entries, section);
            return;
        };

        let mut cursor = Cursor::None;
        let mut leading: Option<Vec<(&str, &Node)>> = Some(Vec::new());
        for (key, value) in entries.occurrences() {
            if key == discriminator {
                cursor = self.open_record(key, value.text());
                for (key, value) in leading.take().into_iter().flatten() {
                    self.field(cursor, key, value);
                }
            } else if let Some(leading) = leading.as_mut() {
                leading.push((key, value));
            } else {
                self.field(cursor, key, value);
            }
        }
    }

    fn nested_blocks(&mut self, entries: &Mapping, section: Section) {
        for (key, value) in entries.occurrences() {
            if value.is_map() || value.is_sequence() {
                self.section(value, section);
            } else {
                tracing::debug!(key = %key, "ignoring key outside any record");
            }
        }
    }

    fn open_record(&mut self, key: &str, value: &str) -> Cursor {
        match key {
            "name" => self.start_group(value),
            _ => self.start_plugin(value),
        }
    }

    fn field(&mut self, cursor: Cursor, key: &str, value: &Node) {
        match (key, cursor) {
            ("name", Cursor::Plugin(i)) => {
                if let Some(name) = value.as_str().filter(|n| !n.is_empty()) {
                    self.plugins[i].name = name.to_string();
                }
            }
            ("description", Cursor::Group(i)) => {
                self.groups[i].description = value.text().to_string();
            }
            ("required_plugins", Cursor::Group(i)) => {
                self.groups[i].required_plugins.extend(scalar_list(value));
            }
            ("dependencies", Cursor::Group(i)) => {
                self.groups[i].dependencies.extend(scalar_list(value));
            }
            ("settings", Cursor::Group(i)) => collect_settings(value, &mut self.groups[i].settings),
            ("enabled", Cursor::Plugin(i)) => self.plugins[i].enabled = value.as_bool(),
            ("mode", Cursor::Plugin(i)) => self.plugins[i].mode = value.text().to_string(),
            ("settings", Cursor::Plugin(i)) => collect_settings(value, &mut self.plugins[i].settings),
            _ => tracing::debug!(key = %key, "ignoring unrecognized key"),
        }
    }

    fn start_group(&mut self, name: &str) -> Cursor {
        if name.is_empty() {
            tracing::debug!("mode group without a name, skipping");
            return Cursor::None;
        }

        let record = ModeGroupRecord::new(name);
        if let Some(i) = self.groups.iter().position(|g| g.name == name) {
            tracing::debug!(group = %name, "mode group redefined, replacing the earlier one");
            self.groups[i] = record;
            return Cursor::Group(i);
        }

        tracing::debug!(group = %name, "mode group");
        self.groups.push(record);
        Cursor::Group(self.groups.len() - 1)
    }

    fn start_plugin(&mut self, file: &str) -> Cursor {
        if file.is_empty() {
            tracing::debug!("plugin entry without a file, skipping");
            return Cursor::None;
        }

        tracing::debug!(plugin = %file, "plugin");
        self.plugins.push(PluginRecord::new(file));
        Cursor::Plugin(self.plugins.len() - 1)
    }
}
