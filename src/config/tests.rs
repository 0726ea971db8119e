// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
#[cfg(test)]
use rstest::rstest;

const SAMPLE: &str = r#"
# Mode groups for the event server
modegroups:
  - name: ctf
    description: "Capture the flag: classic"
    required_plugins:
      - flags.smx
      - teams.smx
    dependencies:
      - core.smx
    settings:
      - key: mp_timelimit
        value: 30
      - key: sv_alltalk
        value: "1"
  - name: dm
    description: Deathmatch   # free for all

plugins:
  - file: flags.smx
    enabled: true
    mode: ctf
  - file: "old.smx"
    enabled: no
  - file: admin.smx
    name: Admin Tools
    settings:
      immunity: 99
"#;

fn policy(plugins: Vec<PluginRecord>) -> ModeConfig {
    ModeConfig { mode_groups: Vec::new(), plugins }
}

fn plugin(file: &str, enabled: bool, mode: &str) -> PluginRecord {
    PluginRecord {
        enabled,
        mode: mode.to_string(),
        ..PluginRecord::new(file)
    }
}

#[test]
fn test_load_sample_config() {
    let config = ModeConfig::load(SAMPLE).expect("Failed to load config");

    let groups = config.mode_groups();
    assert_eq!(groups.len(), 2);

    let ctf = &groups[0];
    assert_eq!(ctf.name, "ctf");
    assert_eq!(ctf.description, "Capture the flag: classic");
    assert_eq!(ctf.required_plugins, vec!["flags.smx", "teams.smx"]);
    assert_eq!(ctf.dependencies, vec!["core.smx"]);
    assert_eq!(ctf.settings.get("mp_timelimit").map(String::as_str), Some("30"));
    assert_eq!(ctf.settings.get("sv_alltalk").map(String::as_str), Some("1"));

    assert_eq!(groups[1].name, "dm");
    assert_eq!(groups[1].description, "Deathmatch");
    assert!(groups[1].required_plugins.is_empty());

    let plugins = config.plugins();
    assert_eq!(plugins.len(), 3);
    assert_eq!(plugins[0], plugin("flags.smx", true, "ctf"));
    assert_eq!(plugins[1].file, "old.smx");
    assert!(!plugins[1].enabled);
    assert_eq!(plugins[2].name, "Admin Tools");
    assert_eq!(plugins[2].settings.get("immunity").map(String::as_str), Some("99"));
}

#[test]
fn test_sibling_record_closes_previous_group() {
    let input = r#"
modegroups:
  - name: A
    description: first
  - name: B
"#;
    let config = ModeConfig::load(input).unwrap();
    assert_eq!(config.mode_groups().len(), 2);
    assert_eq!(config.mode_groups()[0].description, "first");
    assert_eq!(config.mode_groups()[1], ModeGroupRecord::new("B"));
}

#[test]
fn test_flat_section_layout_splits_records() {
    let input = r#"
modegroups:
  name: ctf
  description: capture
  name: dm
plugins:
  file: a.smx
  enabled: false
  file: b.smx
  mode: ctf
"#;
    let config = ModeConfig::load(input).unwrap();

    let groups: Vec<(&str, &str)> = config
        .mode_groups()
        .iter()
        .map(|g| (g.name.as_str(), g.description.as_str()))
        .collect();
    assert_eq!(groups, vec![("ctf", "capture"), ("dm", "")]);
    assert_eq!(
        config.plugins(),
        &[plugin("a.smx", false, ""), plugin("b.smx", true, "ctf")]
    );

    assert!(config.should_load("b.smx", "ctf"));
    assert!(!config.should_load("a.smx", "ctf"));
}

#[test]
fn test_deeper_field_stays_with_its_group() {
    let input = r#"
modegroups:
  name: A
    description: first
  name: B
"#;
    let config = ModeConfig::load(input).unwrap();
    assert_eq!(config.mode_groups().len(), 2);
    assert_eq!(config.mode_groups()[0].description, "first");
    assert_eq!(config.mode_groups()[1], ModeGroupRecord::new("B"));
}

#[test]
fn test_flat_plugins_with_display_names_and_settings() {
    let input = r#"
plugins:
  name: Admin Tools
  file: admin.smx
  settings:
    key: immunity
    value: 99
    key: reserved
    value: slots
  file: other.smx
  name: Other
  enabled: no
"#;
    let config = ModeConfig::load(input).unwrap();
    assert!(config.mode_groups().is_empty());

    let plugins = config.plugins();
    assert_eq!(plugins.len(), 2);
    assert_eq!(plugins[0].name, "Admin Tools");
    let settings: Vec<(&str, &str)> = plugins[0]
        .settings
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(settings, vec![("immunity", "99"), ("reserved", "slots")]);
    assert_eq!(plugins[1].name, "Other");
    assert!(!plugins[1].enabled);
}

#[test]
fn test_keys_without_space_after_colon() {
    let config = ModeConfig::load("plugins:\n  - file:x.smx\n    enabled:false\nmodegroups:\n  - name:ctf\n").unwrap();
    assert_eq!(config.plugins(), &[plugin("x.smx", false, "")]);
    assert!(config.find_group("ctf").is_some());
}

#[test]
fn test_quoting_and_escaping_in_records() {
    let input = r#"
modegroups:
  - name: "has: a colon"
    description: "line \"with\" quotes"
"#;
    let config = ModeConfig::load(input).unwrap();
    let group = config.find_group("has: a colon").expect("group should exist");
    assert_eq!(group.description, r#"line "with" quotes"#);
}

#[test]
fn test_empty_and_whitespace_input() {
    for input in ["", "   \n\t\n", "# only a comment\n"] {
        let config = ModeConfig::load(input).unwrap();
        assert!(config.is_empty());
    }
    let (groups, plugins) = load("unrelated: value\n").unwrap();
    assert!(groups.is_empty());
    assert!(plugins.is_empty());
}

#[test]
fn test_malformed_input_is_tolerated() {
    let input = r#"
modegroups:
  - name: "unclosed
    description: still read
  - stray scalar
  - name: ok
plugins:
  file: lone.smx
  enabled: maybe
"#;
    let config: ModeConfig = input.parse().expect("lenient load should not fail");
    assert_eq!(config.mode_groups().len(), 2);
    assert_eq!(config.mode_groups()[0].name, "unclosed");
    assert_eq!(config.mode_groups()[0].description, "still read");
    assert_eq!(config.plugins(), &[plugin("lone.smx", false, "")]);
}

#[test]
fn test_settings_shapes() {
    let input = r#"
plugins:
  - file: a.smx
    settings:
      - key: first
        value: 1
      - value: orphan
      - key: empty
      - second: 2
  - file: b.smx
    settings:
      key: only
      value: pair
  - file: c.smx
    settings:
      one: 1
      two:
"#;
    let config = ModeConfig::load(input).unwrap();
    let a = &config.plugins()[0].settings;
    assert_eq!(a.len(), 3);
    assert_eq!(a["first"], "1");
    assert_eq!(a["empty"], "");
    assert_eq!(a["second"], "2");

    let b = &config.plugins()[1].settings;
    assert_eq!(b.len(), 1);
    assert_eq!(b["only"], "pair");

    let c = &config.plugins()[2].settings;
    assert_eq!(c.keys().collect::<Vec<_>>(), vec!["one", "two"]);
    assert_eq!(c["two"], "");
}

#[test]
fn test_wrapped_and_keyed_sections() {
    let input = r#"
server:
  modegroups:
    ctf:
      name: ctf
      required_plugins: flags.smx
    dm:
      name: dm
  plugins:
    file: x.smx
    mode: ctf
"#;
    let config = ModeConfig::load(input).unwrap();
    let names: Vec<&str> = config.mode_groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["ctf", "dm"]);
    assert_eq!(config.mode_groups()[0].required_plugins, vec!["flags.smx"]);
    assert_eq!(config.plugins()[0].mode, "ctf");
}

#[test]
fn test_indentless_lists_and_discriminator_order() {
    let input = r#"
modegroups:
- description: listed before its name
  name: late
  required_plugins:
  - a.smx
  - b.smx
"#;
    let config = ModeConfig::load(input).unwrap();
    let group = config.find_group("late").unwrap();
    assert_eq!(group.description, "listed before its name");
    assert_eq!(group.required_plugins, vec!["a.smx", "b.smx"]);
}

#[test]
fn test_duplicate_group_name_last_wins() {
    let input = r#"
modegroups:
  - name: ctf
    description: old
  - name: dm
  - name: ctf
    description: new
"#;
    let config = ModeConfig::load(input).unwrap();
    assert_eq!(config.mode_groups().len(), 2);
    assert_eq!(config.mode_groups()[0].description, "new");
    assert_eq!(config.find_group("ctf").unwrap().description, "new");
}

#[test]
fn test_empty_discriminators_create_nothing() {
    let input = "modegroups:\n  - name:\n    description: x\nplugins:\n  - file: \"\"\n";
    let config = ModeConfig::load(input).unwrap();
    assert!(config.is_empty());
}

#[test]
fn test_find_group() {
    let config = ModeConfig::load(SAMPLE).unwrap();
    assert_eq!(config.find_group("dm").map(|g| g.name.as_str()), Some("dm"));
    assert!(config.find_group("").is_none());
    assert!(config.find_group("CTF").is_none());
}

#[rstest]
#[case("unknown.smx", "ctf", true)]
#[case("", "ctf", true)]
#[case("x.smx", "dm", false)]
#[case("x.smx", "ctf", true)]
#[case("x.smx", "", true)]
#[case("y.smx", "", false)]
#[case("y.smx", "ctf", false)]
#[case("y.smx", "dm", false)]
#[case("z.smx", "anything", true)]
fn test_should_load_policy(#[case] file: &str, #[case] mode: &str, #[case] expected: bool) {
    let config = policy(vec![
        plugin("x.smx", true, "ctf"),
        plugin("y.smx", false, ""),
        plugin("z.smx", true, ""),
    ]);
    assert_eq!(config.should_load(file, mode), expected);
}

#[test]
fn test_should_load_with_no_plugins() {
    let config = ModeConfig::default();
    assert!(config.should_load("unknown.smx", "ctf"));
}

#[test]
fn test_plugins_for_mode() {
    let config = ModeConfig::load(SAMPLE).unwrap();
    let ctf: Vec<&str> = config.plugins_for_mode("ctf").map(|p| p.file.as_str()).collect();
    assert_eq!(ctf, vec!["flags.smx", "admin.smx"]);
    let dm: Vec<&str> = config.plugins_for_mode("dm").map(|p| p.file.as_str()).collect();
    assert_eq!(dm, vec!["admin.smx"]);
}

#[test]
fn test_load_is_deterministic() {
    assert_eq!(ModeConfig::load(SAMPLE).unwrap(), ModeConfig::load(SAMPLE).unwrap());
}

#[test]
fn test_from_file_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("modegroup.yaml");
    std::fs::write(&path, SAMPLE).unwrap();

    let mut config = ModeConfig::from_file(&path).expect("Failed to load file");
    assert_eq!(config.mode_groups().len(), 2);

    let err = config.reload_from_file(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, ModeError::FileError { .. }));
    assert!(err.brief().len() <= crate::error::ERROR_MESSAGE_CAPACITY);
    assert!(config.is_empty(), "failed reload must not keep stale records");

    config.reload_from_file(&path).unwrap();
    assert_eq!(config.plugins().len(), 3);
}

#[test]
fn test_from_file_with_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let fallback = dir.path().join("fallback.yaml");
    std::fs::write(&fallback, "plugins:\n  - file: f.smx\n").unwrap();

    let missing = dir.path().join("primary.yaml");
    let config = ModeConfig::from_file_with_fallback(&missing, &fallback).unwrap();
    assert_eq!(config.plugins()[0].file, "f.smx");

    let err = ModeConfig::from_file_with_fallback(&missing, &missing).unwrap_err();
    match err {
        ModeError::FileError { path, .. } => assert!(path.contains("fallback")),
        other => panic!("expected a file error, got {:?}", other),
    }
}

#[test]
fn test_node_conversions() {
    let doc = crate::parser::parse(
        "port: 27015\nflag: yes\nlist:\n  - a\n  - b\nnested:\n  - [x]\n  - k: v\npairs:\n  a: 1\n  b:\n",
    )
    .unwrap();

    assert_eq!(doc.get_as::<i64>("port").unwrap(), 27015);
    assert!(doc.get_as::<bool>("flag").unwrap());
    assert_eq!(doc.get_as::<Vec<String>>("list").unwrap(), vec!["a", "b"]);
    assert_eq!(doc.get_as::<String>("list.1").unwrap(), "b");

    let pairs: IndexMap<String, String> = doc.get_as("pairs").unwrap();
    assert_eq!(pairs["a"], "1");
    assert_eq!(pairs["b"], "");

    assert!(matches!(
        doc.get_as::<Vec<String>>("nested"),
        Err(ModeError::TypeError { code: Some(401), .. })
    ));
    assert!(matches!(doc.get_as::<i64>("flag"), Err(ModeError::TypeError { .. })));
    assert!(matches!(
        doc.get_as::<String>("missing.path"),
        Err(ModeError::PathNotFound { code: Some(304), .. })
    ));
}
