use std::fs;
use std::path::{Path, PathBuf};
use log::debug;
use serde_yaml::{Mapping, Value};

use crate::config::types::TocConfig;
use crate::config::validation;
use crate::utils::error::{BoxResult, TocError};

/// Configuration file names to look for
const CONFIG_FILES: [&str; 4] = ["_toc.yml", "_toc.yaml", "_toc.toml", "_toc.json"];

/// Load table of contents configuration from config files.
///
/// Without explicit files, the `_toc.*` files in `source_dir` are used. Keys
/// set in a later file override the same keys from earlier ones.
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    config_files: Option<Vec<PathBuf>>,
) -> BoxResult<TocConfig> {
    let config_paths = match config_files {
        Some(paths) => paths,
        None => find_default_config_files(&source_dir),
    };

    let mut merged = Mapping::new();
    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    } else {
        for path in config_paths {
            debug!("Loading configuration from {}", path.display());
            merge_config_file(&mut merged, &path)?;
        }
    }

    let config: TocConfig = serde_yaml::from_value(Value::Mapping(merged))
        .map_err(|e| TocError::Config(format!("Invalid configuration: {}", e)))?;
    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Find default configuration files
fn find_default_config_files<P: AsRef<Path>>(source_dir: P) -> Vec<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.as_ref().join(name))
        .filter(|path| path.exists())
        .collect()
}

/// Merge the keys of a configuration file over the ones loaded so far
fn merge_config_file(merged: &mut Mapping, config_path: &Path) -> BoxResult<()> {
    if !config_path.exists() {
        return Err(TocError::Config(format!(
            "Configuration file not found: {}", config_path.display()
        )).into());
    }

    let content = fs::read_to_string(config_path)
        .map_err(|e| TocError::Config(format!(
            "Failed to read configuration file {}: {}", config_path.display(), e
        )))?;

    let values = match parse_config(&content, config_path)? {
        Value::Mapping(values) => values,
        // An empty file sets nothing
        Value::Null => return Ok(()),
        _ => {
            return Err(TocError::Config(format!(
                "Configuration file {} must contain a table of settings", config_path.display()
            )).into());
        }
    };

    // Report bad values against the file that holds them
    serde_yaml::from_value::<TocConfig>(Value::Mapping(values.clone())).map_err(|e| {
        TocError::Config(format!("Invalid configuration in {}: {}", config_path.display(), e))
    })?;

    for (key, value) in values {
        merged.insert(key, value);
    }

    Ok(())
}

/// Parse configuration content based on the file extension
fn parse_config(content: &str, path: &Path) -> Result<Value, TocError> {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "yml".to_string());

    match ext.as_str() {
        "yml" | "yaml" => serde_yaml::from_str(content).map_err(|e| {
            TocError::Config(format!("Failed to parse YAML configuration ({}): {}", path.display(), e))
        }),
        "toml" => toml::from_str::<toml::Value>(content)
            .map_err(|e| TocError::Config(format!("Failed to parse TOML configuration ({}): {}", path.display(), e)))
            .and_then(|value| to_yaml_value(&value, path)),
        "json" => serde_json::from_str::<serde_json::Value>(content)
            .map_err(|e| TocError::Config(format!("Failed to parse JSON configuration ({}): {}", path.display(), e)))
            .and_then(|value| to_yaml_value(&value, path)),
        other => Err(TocError::Config(format!(
            "Unsupported configuration file format: {}", other
        ))),
    }
}

fn to_yaml_value<T: serde::Serialize>(value: &T, path: &Path) -> Result<Value, TocError> {
    serde_yaml::to_value(value).map_err(|e| {
        TocError::Config(format!("Failed to convert configuration ({}): {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::InsertMode;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config, TocConfig::default());
    }

    #[test]
    fn test_discovers_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_toc.yml"), "src: article\nlevels: 1,2,3\n").unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.src.as_deref(), Some("article"));
        assert_eq!(config.levels, "1,2,3");
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.yml");
        let local = dir.path().join("local.toml");
        let extra = dir.path().join("extra.json");
        fs::write(&base, "src: article\nlang: en\nhighlight_duration_ms: 2500\n").unwrap();
        fs::write(&local, "src = \"main\"\ninsert = \"prepend\"\n").unwrap();
        fs::write(&extra, r#"{"levels": [2, 3]}"#).unwrap();

        let config = load_config(dir.path(), Some(vec![base, local, extra])).unwrap();
        assert_eq!(config.src.as_deref(), Some("main"));
        assert_eq!(config.lang, "en");
        assert_eq!(config.insert, InsertMode::Prepend);
        assert_eq!(config.highlight_duration_ms, 2500);
        assert_eq!(config.levels, "2,3");
    }

    #[test]
    fn test_later_file_can_restore_a_default() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.yml");
        let local = dir.path().join("local.yml");
        fs::write(&base, "lang: en\ninsert: replace\nhighlight_duration_ms: 2500\n").unwrap();
        fs::write(&local, "lang: de\ninsert: append\n").unwrap();

        let config = load_config(dir.path(), Some(vec![base, local])).unwrap();
        assert_eq!(config.lang, "de");
        assert_eq!(config.insert, InsertMode::Append);
        assert_eq!(config.highlight_duration_ms, 2500);
    }

    #[test]
    fn test_empty_file_sets_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_toc.yml"), "").unwrap();
        assert_eq!(load_config(dir.path(), None).unwrap(), TocConfig::default());
    }

    #[test]
    fn test_bad_value_names_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "highlight_duration_ms: soon\n").unwrap();

        let err = load_config(dir.path(), Some(vec![path])).unwrap_err();
        assert!(err.to_string().contains("bad.yml"));
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(dir.path(), Some(vec![dir.path().join("nope.yml")])).is_err());

        let bad = dir.path().join("bad.yml");
        fs::write(&bad, "levels: [1, 2\n").unwrap();
        assert!(load_config(dir.path(), Some(vec![bad])).is_err());

        let odd = dir.path().join("toc.ini");
        fs::write(&odd, "src=article").unwrap();
        assert!(load_config(dir.path(), Some(vec![odd])).is_err());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_toc.yml");
        fs::write(&path, "levels: 3,1\n").unwrap();
        assert!(load_config(dir.path(), None).is_err());
    }
}
