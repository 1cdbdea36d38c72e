//! Replay script: a file-persisted, ordered list of utterances.

use crate::error::ReplayError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A scripted `".quit"` entry terminates the REPL after that turn instead
/// of falling back to interactive mode.
pub const QUIT_SENTINEL: &str = ".quit";

/// An ordered conversation script, written by the record command and
/// consumed front-to-back by replay mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayScript {
    pub skill_id: String,
    pub locale: String,
    #[serde(rename = "type")]
    pub script_type: String,
    pub user_input: Vec<String>,
}

impl ReplayScript {
    /// The only script type this tool understands.
    pub const TEXT_TYPE: &'static str = "text";

    pub fn new(
        skill_id: impl Into<String>,
        locale: impl Into<String>,
        user_input: Vec<String>,
    ) -> Self {
        Self {
            skill_id: skill_id.into(),
            locale: locale.into(),
            script_type: Self::TEXT_TYPE.to_string(),
            user_input,
        }
    }

    /// Load and validate a script from disk.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script: ReplayScript =
            serde_json::from_str(&contents).map_err(|source| ReplayError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if script.script_type != Self::TEXT_TYPE {
            return Err(ReplayError::UnsupportedType {
                found: script.script_type,
            });
        }
        if script.user_input.is_empty() {
            return Err(ReplayError::EmptyScript {
                path: path.to_path_buf(),
            });
        }
        Ok(script)
    }

    /// Write the script to disk as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let bytes = serde_json::to_vec_pretty(self).map_err(|source| ReplayError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, bytes).map_err(|source| ReplayError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
