use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown notation type '{0}' (expected hierarchical, context, bias or sequential)")]
    UnknownNotation(String),

    #[error("edge references unknown node id '{0}'")]
    UnknownNode(String),
}
