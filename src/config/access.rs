use super::*;

impl ModeConfig {
    /// First mode group called `name`. An empty name never matches.
    pub fn find_group(&self, name: &str) -> Option<&ModeGroupRecord> {
        if name.is_empty() {
            return None;
        }
        self.mode_groups.iter().find(|group| group.name == name)
    }

    pub fn find_plugin(&self, file: &str) -> Option<&PluginRecord> {
        if file.is_empty() {
            return None;
        }
        self.plugins.iter().find(|plugin| plugin.file == file)
    }

    /// Whether `filename` should load while `mode` is active.
    ///
    /// Plugins the config does not mention always load. A disabled record
    /// never loads. An empty `mode`, or a record without a mode, defers to the
    /// enabled flag; otherwise the record's mode must match exactly.
    pub fn should_load(&self, filename: &str, mode: &str) -> bool {
        let Some(plugin) = self.find_plugin(filename) else {
            return true;
        };

        if !plugin.enabled {
            return false;
        }
        mode.is_empty() || plugin.mode.is_empty() || plugin.mode == mode
    }

    /// Plugins that load for `mode`, in config order.
    pub fn plugins_for_mode<'a>(&'a self, mode: &'a str) -> impl Iterator<Item = &'a PluginRecord> + 'a {
        self.plugins
            .iter()
            .filter(move |plugin| self.should_load(&plugin.file, mode))
    }
}
