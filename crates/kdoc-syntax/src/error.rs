use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the file-loading entry point. Scanning itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a Kotlin source file: {}", path.display())]
    UnsupportedFile { path: PathBuf },
}
