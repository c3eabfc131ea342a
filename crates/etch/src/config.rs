//! Configuration file loading for etch.
//!
//! Reads `etch.config.json` from the current working directory, or the file
//! given with `--config`. Also provides the JSON Schema for editor
//! autocompletion.

use etch_atelier::ConvertOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "etch.config.json";

/// Top-level etch configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EtchConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Defaults for the `convert` command.
    #[serde(default)]
    pub convert: ConvertOptions,
}

/// Load the config from `path`, or `etch.config.json` in the CWD if None.
///
/// A missing default file yields the defaults. An unreadable or malformed file
/// is reported on stderr and also yields the defaults.
pub fn load_config(path: Option<&Path>) -> EtchConfig {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let base = std::env::current_dir().unwrap_or_default();
            let default_path = base.join(CONFIG_FILE_NAME);
            if !default_path.exists() {
                return EtchConfig::default();
            }
            default_path
        }
    };

    match read_config(&config_path) {
        Ok(config) => {
            tracing::debug!(path = %config_path.display(), "loaded config");
            config
        }
        Err(e) => {
            eprintln!(
                "\x1b[33mWarning:\x1b[0m Failed to load {}: {}",
                config_path.display(),
                e
            );
            EtchConfig::default()
        }
    }
}

fn read_config(path: &Path) -> Result<EtchConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// JSON Schema for `etch.config.json`.
pub const ETCH_CONFIG_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Etch Configuration",
  "description": "Configuration file for etch - markup to DOM statement converter",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "convert": {
      "type": "object",
      "description": "Defaults for the convert command",
      "properties": {
        "rootName": {
          "type": ["string", "null"],
          "description": "Variable the top-level nodes are appended to. Empty or invalid names fall back to \"fragment\".",
          "pattern": "^[A-Za-z_$][A-Za-z0-9_$]*$"
        },
        "naming": {
          "type": "string",
          "description": "How element variables are named",
          "enum": ["structure-derived", "word-pool"],
          "default": "structure-derived"
        },
        "quote": {
          "type": "string",
          "description": "String literal delimiter",
          "enum": ["single", "double"],
          "default": "single"
        },
        "comments": {
          "type": "boolean",
          "description": "Emit createComment statements for markup comments",
          "default": false
        },
        "strict": {
          "type": "boolean",
          "description": "Fail on markup parse errors instead of converting a best-effort tree",
          "default": false
        }
      },
      "additionalProperties": false
    }
  },
  "additionalProperties": false
}"#;
