//! Showcase configuration.

use serde::{Deserialize, Serialize};

use crate::captions::CaptionTable;
use crate::error::ConfigError;
use crate::showcase::ShowcaseRig;

/// Host-facing configuration. Every field has a default so hosts can pass a
/// partial object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Relative path of the model asset loaded at startup.
    pub model_path: String,
    /// Development mode: scroll overlay text, load progress logs, grid helper.
    pub development: bool,
    pub captions: CaptionTable,
    pub rig: ShowcaseRig,
    /// Id of the element that shows the development scroll overlay.
    pub overlay_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: "models/Helmet.glb".to_string(),
            development: false,
            captions: CaptionTable::showcase(),
            rig: ShowcaseRig::default(),
            overlay_id: "scrollProgress".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json(r#"{ "development": true }"#).expect("config parses");
        assert!(cfg.development);
        assert_eq!(cfg.model_path, "models/Helmet.glb");
        assert_eq!(cfg.captions.len(), 5);
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        assert!(matches!(
            Config::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}
