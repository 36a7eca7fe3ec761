use std::path::PathBuf;

use thiserror::Error;

/// Failures of the markdown → HTML conversion.
///
/// `MissingTitle` is a problem with the input document. The other variants
/// mean a node tree was built that cannot be rendered, which the block
/// renderer never does for classified blocks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("markdown document must start with a title as H1 (\"# \")")]
    MissingTitle,

    #[error("parent node has no tag")]
    MissingTag,

    #[error("parent node <{tag}> has no children")]
    EmptyParent { tag: String },

    #[error("leaf node has no value")]
    MissingValue,
}

/// Failures while building a site on disk.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to copy {path}: {source}")]
    Copy {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to convert {path}: {source}")]
    Convert {
        path: PathBuf,
        source: ConvertError,
    },
}
