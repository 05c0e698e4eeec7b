use crate::error::ParseError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List the `.go` files directly inside `dir`, in ascending file-name order.
///
/// The tool works on exactly one package directory, so the walk does not
/// recurse into subdirectories.
pub fn go_file_paths(dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
    if dir.is_file() {
        return Err(ParseError::InvalidPath(dir.display().to_string()));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => ParseError::Io(io),
            None => ParseError::Malformed(format!("failed to walk {}", dir.display())),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) == Some("go") {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}
