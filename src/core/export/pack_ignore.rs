// ─── Pack Ignore ───
// User exclusions for pack exports, persisted next to the instance as a
// plain list of relative paths, one per line.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};

use crate::core::error::{PackError, PackResult};

/// Flat set of user-blocked paths, relative to the instance root.
///
/// Blocking a directory blocks everything below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackIgnore {
    blocked: BTreeSet<PathBuf>,
}

impl PackIgnore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&mut self, path: impl AsRef<Path>) {
        self.blocked.insert(normalize(path.as_ref()));
    }

    pub fn unblock(&mut self, path: impl AsRef<Path>) -> bool {
        self.blocked.remove(&normalize(path.as_ref()))
    }

    /// Whether `path` or one of its ancestors was blocked.
    pub fn is_blocked(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.blocked.iter().any(|blocked| path.starts_with(blocked))
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.blocked.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Parse the file format: one path per line, blank lines skipped.
    pub fn parse(contents: &str) -> Self {
        contents
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    pub fn to_file_contents(&self) -> String {
        self.blocked
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Read the ignore file. A missing file means nothing is blocked yet.
    pub fn load(path: &Path) -> PackResult<Self> {
        match std::fs::read(path) {
            Ok(bytes) => {
                let ignore = Self::parse(&String::from_utf8_lossy(&bytes));
                info!("Loaded {} blocked paths from {:?}", ignore.len(), path);
                Ok(ignore)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(PackError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Overwrite the ignore file with the current set.
    pub fn save(&self, path: &Path) -> PackResult<()> {
        std::fs::write(path, self.to_file_contents()).map_err(|source| {
            warn!("Failed to write {:?}: {}", path, source);
            PackError::Io {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

impl FromIterator<PathBuf> for PackIgnore {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        let mut ignore = Self::default();
        for path in iter {
            ignore.block(path);
        }
        ignore
    }
}

/// Drop `.` components and trailing separators so lookups are stable.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".packignore");

        let mut ignore = PackIgnore::new();
        ignore.block("logs/x.log");
        ignore.block("saves/world1");
        ignore.save(&file).unwrap();

        let loaded = PackIgnore::load(&file).unwrap();
        assert_eq!(loaded, ignore);
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = PackIgnore::load(&dir.path().join(".packignore")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let ignore = PackIgnore::parse("saves/world1\n\n\r\nconfig/foo.toml\n");
        let paths: Vec<&Path> = ignore.paths().collect();
        assert_eq!(
            paths,
            vec![Path::new("config/foo.toml"), Path::new("saves/world1")]
        );
    }

    #[test]
    fn blocking_a_directory_covers_children() {
        let mut ignore = PackIgnore::new();
        ignore.block("saves/world1/");
        assert!(ignore.is_blocked(Path::new("saves/world1")));
        assert!(ignore.is_blocked(Path::new("saves/world1/level.dat")));
        assert!(!ignore.is_blocked(Path::new("saves/world10")));
        assert!(ignore.unblock("./saves/world1"));
        assert!(ignore.is_empty());
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".packignore");
        std::fs::write(&file, "old/path\nother\n").unwrap();

        let mut ignore = PackIgnore::new();
        ignore.block("new/path");
        ignore.save(&file).unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new/path");
    }
}
