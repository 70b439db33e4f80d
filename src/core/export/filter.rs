// ─── Export Filter ───
// Decides which instance files end up in an exported pack. Paths are
// relative to the instance root; the game directory may be nested below it.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};
use walkdir::WalkDir;

use super::pack_ignore::PackIgnore;
use crate::core::error::{PackError, PackResult};
use crate::core::instance::Instance;

/// Game-root folders never worth shipping: logs, crash dumps, loader caches.
pub const DEFAULT_IGNORED_DIRS: [&str; 5] = ["logs", "crash-reports", ".cache", ".fabric", ".quilt"];

/// OS metadata files skipped at any depth.
pub const DEFAULT_IGNORED_NAMES: [&str; 3] = [".DS_Store", "thumbs.db", "Thumbs.db"];

/// Built-in deny rules plus the user's `.packignore` set.
///
/// Queries never mutate the filter, so one instance can be shared by a walk.
#[derive(Debug, Clone)]
pub struct ExportFilter {
    game_prefix: PathBuf,
    ignored_paths: BTreeSet<PathBuf>,
    ignored_names: Vec<String>,
    blocked: PackIgnore,
}

impl Default for ExportFilter {
    /// Filter for an instance whose game root is the instance root.
    fn default() -> Self {
        Self::new(PathBuf::new())
    }
}

impl ExportFilter {
    pub fn new(game_prefix: impl Into<PathBuf>) -> Self {
        let game_prefix = game_prefix.into();
        let ignored_paths = DEFAULT_IGNORED_DIRS
            .iter()
            .map(|dir| game_prefix.join(dir))
            .collect();

        Self {
            game_prefix,
            ignored_paths,
            ignored_names: DEFAULT_IGNORED_NAMES.iter().map(|n| n.to_string()).collect(),
            blocked: PackIgnore::default(),
        }
    }

    /// Filter for `instance`, with its `.packignore` loaded.
    pub fn for_instance(instance: &Instance) -> PackResult<Self> {
        let mut filter = Self::new(instance.game_prefix());
        for dir in instance.index_dirs() {
            filter.ignore_path(dir);
        }
        filter.set_blocked(PackIgnore::load(&instance.pack_ignore_path())?);
        Ok(filter)
    }

    /// Write the user's exclusions back to the instance.
    pub fn save_for_instance(&self, instance: &Instance) -> PackResult<()> {
        let path = instance.pack_ignore_path();
        self.blocked.save(&path)?;
        info!("Saved {} blocked paths to {:?}", self.blocked.len(), path);
        Ok(())
    }

    pub fn game_prefix(&self) -> &Path {
        &self.game_prefix
    }

    /// Exclude an extra path (relative to the instance root) on behalf of the host.
    pub fn ignore_path(&mut self, path: impl Into<PathBuf>) {
        self.ignored_paths.insert(path.into());
    }

    pub fn blocked(&self) -> &PackIgnore {
        &self.blocked
    }

    pub fn blocked_mut(&mut self) -> &mut PackIgnore {
        &mut self.blocked
    }

    pub fn set_blocked(&mut self, blocked: PackIgnore) {
        self.blocked = blocked;
    }

    /// Whether `path` (relative to the instance root) belongs in the export.
    pub fn is_included(&self, path: &Path) -> bool {
        if self.ignored_paths.iter().any(|p| path.starts_with(p)) {
            return false;
        }
        let ignored_name = path.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            self.ignored_names.iter().any(|n| *n == name)
        });
        if ignored_name {
            return false;
        }
        !self.blocked.is_blocked(path)
    }

    /// Walk the game root below `instance_root` and list every included file,
    /// relative to `instance_root` and sorted. Excluded directories are not
    /// descended into. Symlinks are followed and listed under their own path.
    /// Setting `cancel` aborts the walk.
    pub fn walk(&self, instance_root: &Path, cancel: &AtomicBool) -> PackResult<Vec<PathBuf>> {
        let game_root = instance_root.join(&self.game_prefix);
        let mut files = Vec::new();

        let walker = WalkDir::new(&game_root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| match entry.path().strip_prefix(instance_root) {
                Ok(rel) if entry.depth() > 0 => self.is_included(rel),
                _ => true,
            });

        for entry in walker {
            if cancel.load(Ordering::Relaxed) {
                return Err(PackError::Aborted);
            }
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(instance_root)
                .map_err(|e| PackError::Walk(e.to_string()))?;
            files.push(rel.to_path_buf());
        }

        debug!("Export walk of {:?} selected {} files", game_root, files.len());
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::modplatform::{ModLoaderType, ModLoaders};

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn builtin_dirs_are_excluded_without_user_rules() {
        let filter = ExportFilter::default();
        for path in [
            "logs/latest.log",
            "crash-reports/crash-2024.txt",
            ".cache/x",
            ".fabric/remap/a.jar",
            ".quilt/b",
            "logs",
        ] {
            assert!(!filter.is_included(Path::new(path)), "{path}");
        }
        assert!(filter.is_included(Path::new("mods/sodium.jar")));
        assert!(filter.is_included(Path::new("logsbook/page.txt")));
    }

    #[test]
    fn builtin_dirs_follow_game_prefix() {
        let filter = ExportFilter::new("minecraft");
        assert!(!filter.is_included(Path::new("minecraft/logs/latest.log")));
        assert!(filter.is_included(Path::new("minecraft/config/a.toml")));
    }

    #[test]
    fn os_metadata_names_excluded_anywhere() {
        let filter = ExportFilter::default();
        assert!(!filter.is_included(Path::new("config/.DS_Store")));
        assert!(!filter.is_included(Path::new("resourcepacks/Thumbs.db")));
        assert!(filter.is_included(Path::new("resourcepacks/thumbs.dbx")));
    }

    #[test]
    fn user_blocked_paths_are_excluded() {
        let mut filter = ExportFilter::default();
        filter.blocked_mut().block("saves/world1");
        assert!(!filter.is_included(Path::new("saves/world1/level.dat")));
        assert!(filter.is_included(Path::new("saves/world2/level.dat")));
    }

    #[test]
    fn walk_prunes_excluded_trees() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "minecraft/mods/a.jar");
        touch(root, "minecraft/mods/.index/a.pw.toml");
        touch(root, "minecraft/logs/latest.log");
        touch(root, "minecraft/saves/world1/level.dat");
        touch(root, "minecraft/config/.DS_Store");
        touch(root, "minecraft/options.txt");
        touch(root, "instance.json");

        let mut filter = ExportFilter::new("minecraft");
        filter.ignore_path("minecraft/mods/.index");
        filter.blocked_mut().block("minecraft/saves");

        let files = filter.walk(root, &AtomicBool::new(false)).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("minecraft/mods/a.jar"),
                PathBuf::from("minecraft/options.txt"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn walk_includes_symlinked_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "mods/a.jar");
        touch(root, "shared.jar");
        std::os::unix::fs::symlink("../shared.jar", root.join("mods/b.jar")).unwrap();

        let files = ExportFilter::default()
            .walk(root, &AtomicBool::new(false))
            .unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("mods/a.jar"),
                PathBuf::from("mods/b.jar"),
                PathBuf::from("shared.jar"),
            ]
        );
    }

    #[test]
    fn walk_honours_cancellation() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "mods/a.jar");
        let err = ExportFilter::default()
            .walk(dir.path(), &AtomicBool::new(true))
            .unwrap_err();
        assert!(matches!(err, PackError::Aborted));
    }

    #[test]
    fn instance_filter_loads_and_saves_packignore() {
        let dir = tempfile::tempdir().unwrap();
        let inst = Instance::new(
            "Pack".into(),
            "1.20.1".into(),
            ModLoaders::only(ModLoaderType::Forge),
            dir.path(),
        );
        std::fs::create_dir_all(&inst.path).unwrap();
        std::fs::write(inst.pack_ignore_path(), "minecraft/screenshots\n").unwrap();

        let mut filter = ExportFilter::for_instance(&inst).unwrap();
        assert!(!filter.is_included(Path::new("minecraft/screenshots/a.png")));
        assert!(!filter.is_included(Path::new("minecraft/mods/.index/x.toml")));

        filter.blocked_mut().block("minecraft/config/secret.json");
        filter.save_for_instance(&inst).unwrap();

        let reloaded = ExportFilter::for_instance(&inst).unwrap();
        assert_eq!(reloaded.blocked(), filter.blocked());
    }
}
