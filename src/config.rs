use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path, str::FromStr};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{Error, InternalResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Strict lower bound on cosine similarity for `similar_to`.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// Spaces per narration indent level.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    #[serde(default)]
    pub condition_mode: ConditionMode,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            embedding_dimensions: default_embedding_dimensions(),
            indent_width: default_indent_width(),
            snapshot_path: default_snapshot_path(),
            condition_mode: ConditionMode::default(),
        }
    }
}

impl InterpreterConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        let config: Self = from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.as_ref().display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> InternalResult<()> {
        if self.embedding_dimensions == 0 {
            return Err(Error::config("embedding_dimensions must be at least 1"));
        }
        if !(-1.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::config(format!(
                "similarity_threshold must be within [-1, 1], got {}",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}

impl FromStr for InterpreterConfig {
    type Err = Error;

    fn from_str(s: &str) -> InternalResult<Self> {
        let config: Self = from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

/// How `if` conditions are interpreted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConditionMode {
    /// Only conditions mentioning `loss` run their body.
    #[default]
    LossOnly,
    /// Also evaluates `context includes "<keyword>"` against short-term memory.
    ContextIncludes,
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)
        .map_err(|e| Error::config(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

fn default_similarity_threshold() -> f64 {
    0.75
}

fn default_embedding_dimensions() -> usize {
    3
}

fn default_indent_width() -> usize {
    2
}

fn default_snapshot_path() -> String {
    "ctx.json".to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = InterpreterConfig::from_str("{}").unwrap();
        assert_eq!(config, InterpreterConfig::default());
        assert_eq!(config.similarity_threshold, 0.75);
        assert_eq!(config.embedding_dimensions, 3);
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.snapshot_path, "ctx.json");
        assert_eq!(config.condition_mode, ConditionMode::LossOnly);
    }

    #[test]
    fn test_parse_via_from_str_trait() {
        let config: InterpreterConfig = r#"{ "indent_width": 3 }"#.parse().unwrap();
        assert_eq!(config.indent_width, 3);
        assert!("[]".parse::<InterpreterConfig>().is_err());
    }

    #[test]
    fn test_partial_override() {
        let config = InterpreterConfig::from_str(
            r#"{ "indent_width": 4, "condition_mode": "context_includes" }"#,
        )
        .unwrap();
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.condition_mode, ConditionMode::ContextIncludes);
        assert_eq!(config.similarity_threshold, 0.75);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = InterpreterConfig::from_str(r#"{ "embedding_dimensions": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = InterpreterConfig::from_str(r#"{ "similarity_threshold": 2.5 }"#).unwrap_err();
        assert!(err.to_string().contains("similarity_threshold"));

        let err = InterpreterConfig::from_str("not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_condition_mode_names() {
        assert_eq!(ConditionMode::LossOnly.to_string(), "loss_only");
        assert_eq!(
            ConditionMode::from_str("context_includes").unwrap(),
            ConditionMode::ContextIncludes
        );
    }

    #[test]
    fn test_from_file_and_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "snapshot_path": "state.json" }}"#).unwrap();
        let config = InterpreterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.snapshot_path, "state.json");

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(InterpreterConfig::from_file(&missing).is_err());
        assert_eq!(
            InterpreterConfig::load_or_default(&missing).unwrap(),
            InterpreterConfig::default()
        );
    }
}
