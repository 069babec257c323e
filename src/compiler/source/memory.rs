use std::path::Path;

use rustc_hash::FxHashMap;

use super::{SourceError, SourceResolver, SourceUnit};

/// A [`SourceResolver`] over a set of named, in-memory files.  Included
/// paths are joined onto the directory of the including file, and all
/// names are normalized to use `/` as the separator.
#[derive(Debug, Default)]
pub struct MemorySources {
    files: FxHashMap<String, String>,
}

impl MemorySources {
    pub fn new() -> MemorySources {
        MemorySources {
            files: FxHashMap::default(),
        }
    }

    /// Add (or replace) the file `name` with the given text
    pub fn add(&mut self, name: &str, text: &str) {
        self.files.insert(normalize(name), text.into());
    }

    /// Builder form of [`MemorySources::add`]
    pub fn with(mut self, name: &str, text: &str) -> MemorySources {
        self.add(name, text);
        self
    }
}

impl SourceResolver for MemorySources {
    fn open(&self, from: Option<&str>, path: &str) -> Result<SourceUnit, SourceError> {
        let target = match from.and_then(|f| Path::new(f).parent()) {
            Some(dir) => normalize(&dir.join(path).to_string_lossy()),
            None => normalize(path),
        };

        self.files
            .get(&target)
            .map(|text| SourceUnit::new(&target, text))
            .ok_or_else(|| SourceError::NotFound(path.into()))
    }
}

fn normalize(name: &str) -> String {
    name.replace('\\', "/")
}
