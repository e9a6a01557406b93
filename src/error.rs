use std::path::PathBuf;

/// Errors produced while loading or converting a project file.
///
/// Only load failures are fatal. Unmatched conditions, missing child
/// elements and unknown enum literals are logged and skipped instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML Error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("{0}")]
    Condition(String),

    #[error("Invalid configuration '{0}': expected <BuildType>|<Platform>")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
