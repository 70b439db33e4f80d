use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::core::modplatform::{ModLoaderType, ModLoaders};

/// Name of the game working directory inside an instance.
pub const GAME_DIR_NAME: &str = "minecraft";

/// Resource folders that keep a provider metadata index in `.index/`.
const INDEXED_RESOURCE_DIRS: [&str; 4] = ["mods", "resourcepacks", "shaderpacks", "texturepacks"];

/// The parts of an instance the resolver and the exporter read.
///
/// Each instance has its own folder under `instances/<uuid>/` with:
/// - `minecraft/`           — game working directory
/// - `.packignore`          — paths excluded from pack exports
/// - `export_settings.json` — last used export dialog values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub minecraft_version: String,
    /// Loaders installed in this instance.
    pub loaders: ModLoaders,
    pub created_at: DateTime<Utc>,
}

impl Instance {
    pub fn new(
        name: String,
        minecraft_version: String,
        loaders: ModLoaders,
        base_dir: &std::path::Path,
    ) -> Self {
        let id = Uuid::new_v4().to_string();
        let path = base_dir.join(&id);

        Self {
            id,
            name,
            path,
            minecraft_version,
            loaders,
            created_at: Utc::now(),
        }
    }

    /// Loaders in fixed order, as the resolver expects them.
    pub fn loader_list(&self) -> Vec<ModLoaderType> {
        self.loaders.iter().collect()
    }

    /// Path to the instance's `minecraft/` game working directory.
    pub fn game_dir(&self) -> PathBuf {
        self.path.join(GAME_DIR_NAME)
    }

    /// Game directory relative to the instance root.
    pub fn game_prefix(&self) -> PathBuf {
        PathBuf::from(GAME_DIR_NAME)
    }

    /// Provider index folders, relative to the instance root.
    pub fn index_dirs(&self) -> Vec<PathBuf> {
        INDEXED_RESOURCE_DIRS
            .iter()
            .map(|dir| self.game_prefix().join(dir).join(".index"))
            .collect()
    }

    pub fn pack_ignore_path(&self) -> PathBuf {
        self.path.join(".packignore")
    }

    pub fn export_settings_path(&self) -> PathBuf {
        self.path.join("export_settings.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_instance_root() {
        let inst = Instance::new(
            "Pack".into(),
            "1.20.1".into(),
            ModLoaders::only(ModLoaderType::Fabric),
            std::path::Path::new("/data/instances"),
        );
        assert_eq!(inst.path, PathBuf::from("/data/instances").join(&inst.id));
        assert_eq!(inst.game_dir(), inst.path.join("minecraft"));
        assert_eq!(inst.pack_ignore_path(), inst.path.join(".packignore"));
        assert_eq!(
            inst.index_dirs()[0],
            PathBuf::from("minecraft/mods/.index")
        );
        assert_eq!(inst.loader_list(), vec![ModLoaderType::Fabric]);
    }
}
