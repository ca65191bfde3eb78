use log::{debug, warn};

use crate::config::TocConfig;
use crate::toc;
use crate::utils::error::{BoxResult, TocError};

/// Validate the configuration
pub fn validate_config(config: &TocConfig) -> BoxResult<()> {
    validate_levels(config)?;
    validate_classes(config)?;
    validate_highlight(config)?;
    validate_lang(config);

    Ok(())
}

/// Validate the requested levels
fn validate_levels(config: &TocConfig) -> BoxResult<()> {
    let levels = config.requested_levels()?;
    debug!("Table of contents levels: {}", levels);
    Ok(())
}

/// Validate class names and element ids
fn validate_classes(config: &TocConfig) -> BoxResult<()> {
    let names = [
        ("base_class", &config.base_class),
        ("nav_class", &config.nav_class),
        ("highlight_class", &config.highlight_class),
        ("dest", &config.dest),
    ];

    for (field, value) in names {
        if value.trim().is_empty() {
            return Err(TocError::Config(format!("{} must not be empty", field)).into());
        }
        if value.chars().any(char::is_whitespace) {
            return Err(TocError::Config(format!(
                "{} must be a single name without whitespace: '{}'", field, value
            )).into());
        }
    }

    Ok(())
}

/// Validate the highlight timing
fn validate_highlight(config: &TocConfig) -> BoxResult<()> {
    if config.highlight_duration_ms == 0 {
        return Err(TocError::Config("highlight_duration_ms must be greater than 0".to_string()).into());
    }
    Ok(())
}

/// Warn about languages without labels
fn validate_lang(config: &TocConfig) {
    if !toc::is_supported_lang(&config.lang) {
        warn!("No labels for language '{}', falling back to '{}'", config.lang, "de");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&TocConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = TocConfig {
            levels: "1,9".to_string(),
            ..TocConfig::default()
        };
        assert!(validate_config(&config).is_err());

        let config = TocConfig {
            highlight_class: "scrolled to".to_string(),
            ..TocConfig::default()
        };
        assert!(validate_config(&config).is_err());

        let config = TocConfig {
            dest: " ".to_string(),
            ..TocConfig::default()
        };
        assert!(validate_config(&config).is_err());

        let config = TocConfig {
            highlight_duration_ms: 0,
            ..TocConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_unknown_lang_is_only_a_warning() {
        let config = TocConfig {
            lang: "fr".to_string(),
            ..TocConfig::default()
        };
        assert!(validate_config(&config).is_ok());
    }
}
