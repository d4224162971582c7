//! Configuration sources and their effect on parsing

use std::io::Write;

use serial_test::serial;
use shapematch::config::{CliConfig, ConfigError, MatchConfig};
use shapematch::pattern_cache::{PatternCache, PatternCacheConfig};
use shapematch::pattern_parser::MAX_NESTING_LIMIT;
use shapematch::{FieldPattern, Pattern, PatternParser, PatternSyntaxError};

const ENV_VARS: [&str; 4] = [
    "SHAPEMATCH_MARKER",
    "SHAPEMATCH_MAX_DEPTH",
    "SHAPEMATCH_PATTERN_CACHE_ENABLED",
    "SHAPEMATCH_PATTERN_CACHE_MAX_ENTRIES",
];

fn clear_env() {
    for key in ENV_VARS {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = MatchConfig::from_env().unwrap();
    assert_eq!(config, MatchConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("SHAPEMATCH_MARKER", "any");
    std::env::set_var("SHAPEMATCH_MAX_DEPTH", "4");
    std::env::set_var("SHAPEMATCH_PATTERN_CACHE_ENABLED", "false");

    let config = MatchConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.marker, "any");
    assert_eq!(config.max_depth, 4);
    assert!(!config.cache_enabled);
}

#[test]
#[serial]
fn test_from_env_unparsable_value() {
    clear_env();
    std::env::set_var("SHAPEMATCH_MAX_DEPTH", "deep");
    let result = MatchConfig::from_env();
    clear_env();

    match result {
        Err(ConfigError::Parse { field, value, .. }) => {
            assert_eq!(field, "SHAPEMATCH_MAX_DEPTH");
            assert_eq!(value, "deep");
        }
        other => panic!("Expected parse error, got: {:?}", other),
    }
}

#[test]
#[serial]
fn test_from_env_invalid_marker() {
    clear_env();
    std::env::set_var("SHAPEMATCH_MARKER", "not-an-identifier");
    let result = MatchConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
#[serial]
fn test_from_env_depth_above_ceiling() {
    clear_env();
    std::env::set_var("SHAPEMATCH_MAX_DEPTH", "1024");
    let result = MatchConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
#[serial]
fn test_cache_config_from_env() {
    clear_env();
    std::env::set_var("SHAPEMATCH_PATTERN_CACHE_ENABLED", "false");
    std::env::set_var("SHAPEMATCH_PATTERN_CACHE_MAX_ENTRIES", "7");
    let result = PatternCacheConfig::from_env();
    clear_env();

    let config = result.unwrap();
    assert!(!config.enabled);
    assert_eq!(config.max_entries, 7);
}

#[test]
#[serial]
fn test_cache_config_from_env_unparsable_value() {
    clear_env();
    std::env::set_var("SHAPEMATCH_PATTERN_CACHE_MAX_ENTRIES", "lots");
    let config_result = PatternCacheConfig::from_env();
    let cache_result = PatternCache::from_env();
    clear_env();

    match config_result {
        Err(ConfigError::Parse { field, value, .. }) => {
            assert_eq!(field, "SHAPEMATCH_PATTERN_CACHE_MAX_ENTRIES");
            assert_eq!(value, "lots");
        }
        other => panic!("Expected parse error, got: {:?}", other),
    }
    assert!(matches!(cache_result, Err(ConfigError::Parse { .. })));
}

#[test]
#[serial]
fn test_cache_config_from_env_zero_entries() {
    clear_env();
    std::env::set_var("SHAPEMATCH_PATTERN_CACHE_MAX_ENTRIES", "0");
    let result = PatternCacheConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn test_from_yaml_file_partial() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "marker: present\nmax_depth: 2")?;

    let config = MatchConfig::from_yaml_file(file.path())?;
    assert_eq!(config.marker, "present");
    assert_eq!(config.max_depth, 2);
    assert_eq!(config.cache_max_entries, 1000);
    Ok(())
}

#[test]
fn test_from_yaml_file_invalid() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "max_depth: 0")?;
    assert!(matches!(
        MatchConfig::from_yaml_file(file.path()),
        Err(ConfigError::Validation(_))
    ));
    Ok(())
}

#[test]
fn test_from_yaml_file_missing() {
    let result = MatchConfig::from_yaml_file("/nonexistent/shapematch.yaml");
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_cli_overrides_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "marker: present\nmax_depth: 2")?;

    let config = MatchConfig::from_cli(CliConfig {
        config_file: Some(file.path().to_path_buf()),
        marker: Some("any".to_string()),
        max_depth: None,
        no_cache: true,
    })?;

    assert_eq!(config.marker, "any");
    assert_eq!(config.max_depth, 2);
    assert!(!config.cache_enabled);
    Ok(())
}

#[test]
fn test_configured_parser() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "marker: any\nmax_depth: 2")?;
    let config = MatchConfig::from_yaml_file(file.path())?;
    let parser = PatternParser::new(config.parser_config());

    assert_eq!(
        parser.parse("{a: any, b: {c: any}}")?,
        Pattern::record(vec![
            ("a", FieldPattern::Leaf),
            ("b", FieldPattern::nested(vec![("c", FieldPattern::Leaf)])),
        ])
    );
    assert_eq!(
        parser.parse("{a: {b: {c: any}}}"),
        Err(PatternSyntaxError::TooDeep(2))
    );
    assert!(parser.parse("{a: _}").is_err());
    Ok(())
}

#[test]
fn test_parser_at_configured_ceiling() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "max_depth: {}", MAX_NESTING_LIMIT)?;
    let config = MatchConfig::from_yaml_file(file.path())?;
    let parser = PatternParser::new(config.parser_config());

    let nested = |levels: usize| format!("{}_{}", "{a: ".repeat(levels), "}".repeat(levels));
    assert!(parser.parse(&nested(MAX_NESTING_LIMIT)).is_ok());
    assert_eq!(
        parser.parse(&nested(MAX_NESTING_LIMIT + 1)),
        Err(PatternSyntaxError::TooDeep(MAX_NESTING_LIMIT))
    );
    Ok(())
}
