// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying

//! Typed errors for the session layer.
//!
//! Staleness is not an error: operations that need a fresh diff return
//! `Ok(None)` or `false` instead. Only requests that can never succeed end
//! up here.

use std::path::PathBuf;

use thiserror::Error;

use crate::side::Side;

/// Errors returned by [`crate::MergeView`] and [`crate::MergeConfig`].
#[derive(Debug, Error)]
pub enum MergeError {
    /// A chunk range starts past the end of the buffer it refers to.
    #[error("chunk starts at line {line} but the {pane} pane has only {line_count} lines")]
    ChunkOutOfRange {
        /// Which buffer was too short ("edit" or "original").
        pane: &'static str,
        /// First line of the offending range.
        line: usize,
        /// Line count of the buffer at the time of the request.
        line_count: usize,
    },

    /// A line query names a line past the end of its pane.
    #[error("line {line} is past the end of the {pane} pane ({line_count} lines)")]
    LineOutOfRange {
        pane: &'static str,
        line: usize,
        line_count: usize,
    },

    /// The session was built without an original on this side.
    #[error("no {0} original in this merge view")]
    MissingSide(Side),

    /// The config file exists but could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`crate::MergeConfig`].
    #[error("failed to parse config '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The config file parsed but names values no pane can use.
    #[error("invalid config '{}': {reason}", path.display())]
    ConfigInvalid { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = MergeError::ChunkOutOfRange {
            pane: "edit",
            line: 12,
            line_count: 4,
        };
        assert_eq!(
            err.to_string(),
            "chunk starts at line 12 but the edit pane has only 4 lines"
        );
        assert_eq!(
            MergeError::MissingSide(Side::Left).to_string(),
            "no left original in this merge view"
        );
    }

    #[test]
    fn test_config_errors_keep_their_source() {
        use std::error::Error as _;

        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = MergeError::ConfigParse {
            path: PathBuf::from("/tmp/config.json"),
            source,
        };
        assert!(err.to_string().starts_with("failed to parse config '/tmp/config.json'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_config_names_the_field() {
        let err = MergeError::ConfigInvalid {
            path: PathBuf::from("/tmp/config.json"),
            reason: "line_height_px must be positive, got 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config '/tmp/config.json': line_height_px must be positive, got 0"
        );
    }
}
