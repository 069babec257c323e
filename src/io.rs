use std::path::{Path, PathBuf};

use log::debug;

use crate::compiler::source::{SourceError, SourceResolver, SourceUnit};

/// Reads source files from disk.  An included path is looked up in the
/// directory of the file that includes it and then in each include
/// directory in the order they were given.  The root file is looked up the
/// same way, starting from the current directory.
#[derive(Debug, Default)]
pub struct FileSystemSources {
    include_dirs: Vec<PathBuf>,
}

impl FileSystemSources {
    pub fn new<P: AsRef<Path>>(include_dirs: &[P]) -> FileSystemSources {
        FileSystemSources {
            include_dirs: include_dirs.iter().map(|d| d.as_ref().to_path_buf()).collect(),
        }
    }

    /// The paths to try, in order.  The root file has no including file, so
    /// its path is tried as given before the include directories.
    fn candidates(&self, from: Option<&str>, path: &str) -> Vec<PathBuf> {
        let base = from
            .and_then(|f| Path::new(f).parent())
            .unwrap_or_else(|| Path::new(""));
        let mut candidates = vec![base.join(path)];

        for dir in &self.include_dirs {
            candidates.push(dir.join(path));
        }
        candidates
    }
}

impl SourceResolver for FileSystemSources {
    /// Units are identified by their canonical path, so a file reached
    /// through `..` or a symlink is still recognized as the same file.
    fn open(&self, from: Option<&str>, path: &str) -> Result<SourceUnit, SourceError> {
        for candidate in self.candidates(from, path) {
            if !candidate.is_file() {
                continue;
            }

            debug!("Resolved '{}' to {}", path, candidate.display());
            let name = candidate.to_string_lossy().replace('\\', "/");
            let identity = match std::fs::canonicalize(&candidate) {
                Ok(canonical) => canonical.to_string_lossy().into_owned(),
                Err(e) => return Err(SourceError::Io(name, e)),
            };
            return match std::fs::read_to_string(&candidate) {
                Ok(text) => Ok(SourceUnit::new(&name, &text).with_identity(&identity)),
                Err(e) => Err(SourceError::Io(name, e)),
            };
        }

        Err(SourceError::NotFound(path.into()))
    }
}
