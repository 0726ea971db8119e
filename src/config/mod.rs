// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use crate::ast::Node;
use crate::options::ParseOptions;
use crate::parser::{source, Parser};
use crate::ModeError;

mod access;
mod conversion;
mod helpers;
mod projector;

/// A named bundle of plugin-loading policy, selected by a runtime mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ModeGroupRecord {
    pub name: String,
    pub description: String,
    pub required_plugins: Vec<String>,
    pub dependencies: Vec<String>,
    pub settings: IndexMap<String, String>,
}

impl ModeGroupRecord {
    pub fn new(name: impl Into<String>) -> Self {
        ModeGroupRecord {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Load policy for one plugin file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginRecord {
    pub file: String,
    /// Display name; the file name unless the config says otherwise.
    pub name: String,
    pub enabled: bool,
    /// Empty means the plugin is not restricted to a mode.
    pub mode: String,
    pub settings: IndexMap<String, String>,
}

impl PluginRecord {
    pub fn new(file: impl Into<String>) -> Self {
        let file = file.into();
        PluginRecord {
            name: file.clone(),
            file,
            enabled: true,
            mode: String::new(),
            settings: IndexMap::new(),
        }
    }
}

/// Mode groups and plugin records read from a `modegroups:` / `plugins:` config.
///
/// Loading is permissive: unknown keys are skipped and missing sections give
/// empty lists. Only file access can fail.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ModeConfig {
    mode_groups: Vec<ModeGroupRecord>,
    plugins: Vec<PluginRecord>,
}

impl ModeConfig {
    /// Parse config text with the lenient options.
    pub fn load(text: &str) -> Result<Self, ModeError> {
        Self::load_with(text, &ParseOptions::lenient())
    }

    pub fn load_with(text: &str, options: &ParseOptions) -> Result<Self, ModeError> {
        let root = Parser::with_options(options.clone()).parse(text)?;
        Ok(Self::from_node(&root))
    }

    /// Project an already parsed tree onto config records.
    pub fn from_node(root: &Node) -> Self {
        let (mode_groups, plugins) = projector::project(root);
        tracing::debug!(groups = mode_groups.len(), plugins = plugins.len(), "projected config");
        ModeConfig { mode_groups, plugins }
    }

    /// Load a config file. A leading `~/` is expanded to the home directory.
    ///
    /// # Example
    /// ```ignore
    /// let config = ModeConfig::from_file("cfg/modegroup.yaml")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModeError> {
        let content = source::read_source(path.as_ref())?;
        let config = Self::load(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            groups = config.mode_groups.len(),
            plugins = config.plugins.len(),
            "loaded mode group config"
        );
        Ok(config)
    }

    /// Load a config file, falling back to a second path when the first
    /// cannot be read.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, ModeError> {
        match Self::from_file(&primary) {
            Ok(config) => Ok(config),
            Err(ModeError::FileError { .. }) => {
                Self::from_file(&fallback).map_err(|e| match e {
                    ModeError::FileError { message, .. } => ModeError::FileError {
                        message: format!(
                            "Failed to load config from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the config files exists".into()),
                        code: Some(301),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Replace the current records with the contents of `path`. The records
    /// are cleared first, so a failed reload leaves an empty config behind.
    pub fn reload_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ModeError> {
        self.clear();
        *self = Self::from_file(path)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.mode_groups.clear();
        self.plugins.clear();
    }

    pub fn mode_groups(&self) -> &[ModeGroupRecord] {
        &self.mode_groups
    }

    pub fn plugins(&self) -> &[PluginRecord] {
        &self.plugins
    }

    pub fn is_empty(&self) -> bool {
        self.mode_groups.is_empty() && self.plugins.is_empty()
    }

    pub fn into_parts(self) -> (Vec<ModeGroupRecord>, Vec<PluginRecord>) {
        (self.mode_groups, self.plugins)
    }
}

impl FromStr for ModeConfig {
    type Err = ModeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::load(text)
    }
}

/// Parse config text into its mode group and plugin records.
pub fn load(text: &str) -> Result<(Vec<ModeGroupRecord>, Vec<PluginRecord>), ModeError> {
    ModeConfig::load(text).map(ModeConfig::into_parts)
}

#[cfg(test)]
mod tests;
