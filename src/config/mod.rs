use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_yml::Value;

use crate::compile::DEFAULT_MARKER;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".relex-rules.yml";

/// Per-check configuration from the `Check:` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckConfig {
    /// `None` keeps the check's own default.
    pub enabled: Option<bool>,
}

/// Resolved configuration from `.relex-rules.yml`.
///
/// ```yaml
/// Compile:
///   Markers: ['[BE]']
/// Check:
///   LineNumbers: true
///   UnusedLhsVar:
///     Enabled: true
/// ```
#[derive(Debug)]
pub struct ResolvedConfig {
    config_path: Option<PathBuf>,
    markers: Vec<String>,
    line_numbers: bool,
    check_configs: HashMap<String, CheckConfig>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            markers: vec![DEFAULT_MARKER.to_string()],
            line_numbers: false,
            check_configs: HashMap::new(),
        }
    }
}

/// Load config from the given path, or look for `.relex-rules.yml` in the
/// current directory. A missing default file yields the defaults; a missing
/// explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = Path::new(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(ResolvedConfig::default());
            }
            p.to_path_buf()
        }
    };

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let mut config = parse_config(&contents)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;
    config.config_path = Some(config_path);
    Ok(config)
}

fn parse_config(contents: &str) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    if contents.trim().is_empty() {
        return Ok(config);
    }

    let raw: Value = serde_yml::from_str(contents)?;
    let Value::Mapping(map) = &raw else {
        return Ok(config);
    };

    for (key, value) in map {
        match key.as_str() {
            Some("Compile") => {
                if let Some(markers) = extract_string_list(value, "Markers") {
                    config.markers = markers;
                }
            }
            Some("Check") => {
                let Value::Mapping(section) = value else {
                    continue;
                };
                for (k, v) in section {
                    match k.as_str() {
                        Some("LineNumbers") => {
                            if let Some(b) = v.as_bool() {
                                config.line_numbers = b;
                            }
                        }
                        Some(name) => {
                            config
                                .check_configs
                                .insert(name.to_string(), parse_check_config(v));
                        }
                        None => {}
                    }
                }
            }
            _ => {}
        }
    }

    Ok(config)
}

impl ResolvedConfig {
    /// Where the config was loaded from, if a file was found.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Pattern markers that make a definition line active.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn line_numbers(&self) -> bool {
        self.line_numbers
    }

    /// Whether the named check should run, falling back to `default` when
    /// the config says nothing about it.
    pub fn is_check_enabled(&self, name: &str, default: bool) -> bool {
        self.check_configs
            .get(name)
            .and_then(|c| c.enabled)
            .unwrap_or(default)
    }
}

fn parse_check_config(value: &Value) -> CheckConfig {
    let mut config = CheckConfig::default();
    if let Value::Mapping(map) = value {
        for (k, v) in map {
            if k.as_str() == Some("Enabled") {
                config.enabled = v.as_bool();
            }
        }
    }
    config
}

fn extract_string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    value
        .as_mapping()?
        .get(&Value::String(key.to_string()))?
        .as_sequence()
        .map(|seq| {
            seq.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
}
