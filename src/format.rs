use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::FormatError;

/// Post-processes generated source text before it is written out.
pub trait Formatter {
    fn format(&self, path: &Path, source: &str) -> Result<String, FormatError>;
}

/// Formats Go source by piping it through `goimports` or `gofmt`.
pub struct GoimportsFormatter {
    program: PathBuf,
}

impl GoimportsFormatter {
    /// Use a specific formatting executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Look up a Go formatting tool on `PATH`, preferring `goimports` since
    /// it also fixes up the import declarations of the generated file.
    pub fn discover() -> Option<Self> {
        ["goimports", "gofmt"]
            .iter()
            .find_map(|tool| which::which(tool).ok())
            .map(Self::new)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn arguments(&self, path: &Path) -> Vec<OsString> {
        // gofmt has no -srcdir flag; only goimports resolves import paths
        // relative to the location of the generated file.
        let goimports = self
            .program
            .file_stem()
            .is_some_and(|stem| stem == "goimports");
        let srcdir = path.parent().filter(|dir| !dir.as_os_str().is_empty());
        match srcdir {
            Some(dir) if goimports => {
                vec![OsString::from("-srcdir"), dir.as_os_str().to_os_string()]
            }
            _ => Vec::new(),
        }
    }
}

impl Formatter for GoimportsFormatter {
    fn format(&self, path: &Path, source: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.program)
            .args(self.arguments(path))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FormatError::Failed(format!(
                "{} {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|_| {
            FormatError::Failed(format!(
                "{} produced invalid UTF-8",
                self.program.display()
            ))
        })
    }
}

/// Returns generated source unchanged apart from guaranteeing a trailing
/// newline. Fallback for machines without a Go toolchain.
pub struct PassthroughFormatter;

impl Formatter for PassthroughFormatter {
    fn format(&self, _path: &Path, source: &str) -> Result<String, FormatError> {
        if source.ends_with('\n') {
            Ok(source.to_string())
        } else {
            Ok(format!("{source}\n"))
        }
    }
}

/// Picks the best formatter available on this machine.
pub fn default_formatter() -> Box<dyn Formatter> {
    formatter_or_fallback(GoimportsFormatter::discover())
}

fn formatter_or_fallback(discovered: Option<GoimportsFormatter>) -> Box<dyn Formatter> {
    match discovered {
        Some(formatter) => {
            debug!("formatting with {}", formatter.program().display());
            Box::new(formatter)
        }
        None => {
            warn!("no goimports or gofmt on PATH, writing output unformatted");
            Box::new(PassthroughFormatter)
        }
    }
}
