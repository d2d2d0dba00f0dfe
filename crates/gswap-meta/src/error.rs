//! Error types for `.meta` access and swap plans.

use std::path::PathBuf;

use gswap_model::Guid;
use thiserror::Error;

/// Errors from reading, rewriting or swapping `.meta` GUIDs.
#[derive(Debug, Error)]
pub enum MetaError {
    /// The asset has no `.meta` sidecar.
    #[error("meta file not found: {path}")]
    MetaNotFound { path: PathBuf },

    /// Failed to read a `.meta` file.
    #[error("failed to read {path}: {source}")]
    MetaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a `.meta` file or its backup.
    #[error("failed to write {path}: {source}")]
    MetaWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No `guid:` line in the file.
    #[error("no guid entry in {path}")]
    MissingGuid { path: PathBuf },

    /// The `guid:` value is not 32 hex digits.
    #[error("invalid guid '{value}' in {path}")]
    InvalidGuid { path: PathBuf, value: String },

    /// The same asset appears in more than one swap.
    #[error("asset appears in more than one swap: {path}")]
    DuplicateAsset { path: PathBuf },

    /// A pair maps an asset onto itself.
    #[error("asset is paired with itself: {path}")]
    SelfPair { path: PathBuf },

    /// The `.meta` changed since the plan was built.
    #[error("guid in {path} is {found}, plan expected {expected}")]
    StaleGuid {
        path: PathBuf,
        expected: Guid,
        found: Guid,
    },

    /// Failed to read or write a plan file.
    #[error("plan file {path}: {source}")]
    PlanIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A plan file is not valid JSON for a swap plan.
    #[error("failed to parse plan {path}: {source}")]
    PlanParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a plan failed.
    #[error("failed to serialize plan: {0}")]
    PlanSerialize(#[from] serde_json::Error),
}

/// Result type for `.meta` operations.
pub type Result<T> = std::result::Result<T, MetaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_guid_display() {
        let err = MetaError::StaleGuid {
            path: PathBuf::from("Assets/hero.png.meta"),
            expected: "00000000000000000000000000000001".parse().unwrap(),
            found: "00000000000000000000000000000002".parse().unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "guid in Assets/hero.png.meta is 00000000000000000000000000000002, \
             plan expected 00000000000000000000000000000001"
        );
    }
}
