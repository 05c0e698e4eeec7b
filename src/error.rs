use std::path::PathBuf;
use thiserror::Error;

/// Error whilst loading and parsing a package directory
#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Malformed(String),
    #[error("expected a directory: {0}")]
    InvalidPath(String),
}

/// Error whilst rendering a method signature back to source text
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{0}")]
    Malformed(String),
}

/// Error whilst parsing or executing the interface template
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to parse template: {0}")]
    Parse(String),
    #[error("failed to render template: {0}")]
    Render(String),
}

/// Error whilst formatting generated source
#[derive(Error, Debug)]
pub enum FormatError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Failed(String),
}

/// Error for one interface-generation run
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Unable to parse folder {}", .folder.display())]
    ParseDir {
        folder: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("Unable to find package {0}")]
    PackageNotFound(String),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("Failed to remove {}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
