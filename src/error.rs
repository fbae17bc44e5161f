use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain the input stream at all.
///
/// A missing file and an empty file produce the same (empty) report, but
/// only the former is an error here, so callers can tell them apart.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot open input file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InputError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            InputError::NotFound { path } | InputError::Open { path, .. } => path,
        }
    }
}
