//! Swap plan persistence.
//!
//! Plans are stored as pretty-printed JSON so they can be reviewed (and
//! trimmed by hand) between `match` and `swap`.

use std::fs;
use std::path::{Path, PathBuf};

use gswap_model::SwapPlan;
use serde::{Deserialize, Serialize};

use crate::error::{MetaError, Result};

/// Current plan file format version.
pub const PLAN_FORMAT_VERSION: &str = "1.0";

/// A plan plus file-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPlan {
    #[serde(flatten)]
    pub plan: SwapPlan,
    /// Optional notes about this plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    PLAN_FORMAT_VERSION.to_string()
}

impl StoredPlan {
    pub fn new(plan: SwapPlan) -> Self {
        Self {
            plan,
            description: None,
            version: default_version(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Write a plan to `path`, creating parent directories as needed.
pub fn save_plan(path: &Path, stored: &StoredPlan) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| MetaError::PlanIo {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(stored)?;
    fs::write(path, json).map_err(|source| MetaError::PlanIo {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

/// Load a plan previously written by [`save_plan`].
pub fn load_plan(path: &Path) -> Result<StoredPlan> {
    let contents = fs::read_to_string(path).map_err(|source| MetaError::PlanIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| MetaError::PlanParse {
        path: path.to_path_buf(),
        source,
    })
}
