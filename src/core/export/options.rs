use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::{PackError, PackResult};
use crate::core::instance::Instance;

/// Target format of an exported pack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportProvider {
    Modrinth,
    Flame,
}

impl ExportProvider {
    pub fn default_extension(self) -> &'static str {
        match self {
            ExportProvider::Modrinth => "mrpack",
            ExportProvider::Flame => "zip",
        }
    }

    fn accepts_extension(self, ext: &str) -> bool {
        match self {
            ExportProvider::Modrinth => ext == "mrpack" || ext == "zip",
            ExportProvider::Flame => ext == "zip",
        }
    }
}

/// Export dialog values remembered per instance in `export_settings.json`.
///
/// `summary` is only used by Modrinth packs and `author` only by CurseForge
/// packs; both are kept so switching provider does not lose them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub name: String,
    pub version: String,
    pub summary: String,
    pub author: String,
    pub optional_files: bool,
}

impl ExportOptions {
    /// Previously saved values, or defaults when none were saved.
    pub fn load(instance: &Instance) -> PackResult<Self> {
        let path = instance.export_settings_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(PackError::Io { path, source }),
        };
        match serde_json::from_str(&raw) {
            Ok(options) => Ok(options),
            Err(e) => {
                warn!("Corrupt export settings at {:?}: {}", path, e);
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, instance: &Instance) -> PackResult<()> {
        let path = instance.export_settings_path();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json).map_err(|source| PackError::Io { path, source })
    }

    /// Modrinth packs must carry a version.
    pub fn validate(&self, provider: ExportProvider) -> PackResult<()> {
        if provider == ExportProvider::Modrinth && self.version.is_empty() {
            return Err(PackError::Other("Modrinth packs require a version".into()));
        }
        Ok(())
    }

    /// Pack name, falling back to the instance name when left empty.
    pub fn effective_name<'a>(&'a self, instance_name: &'a str) -> &'a str {
        if self.name.is_empty() {
            instance_name
        } else {
            &self.name
        }
    }

    /// Suggested output file name, e.g. `My Pack.mrpack`.
    pub fn output_file_name(&self, provider: ExportProvider, instance_name: &str) -> String {
        format!(
            "{}.{}",
            remove_invalid_filename_chars(self.effective_name(instance_name)),
            provider.default_extension()
        )
    }
}

/// Append the provider's extension unless `path` already has one it accepts.
pub fn normalize_output_path(provider: ExportProvider, path: PathBuf) -> PathBuf {
    let accepted = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| provider.accepts_extension(ext));
    if accepted {
        return path;
    }
    let mut raw = path.into_os_string();
    raw.push(".");
    raw.push(provider.default_extension());
    PathBuf::from(raw)
}

/// Replace characters no common filesystem accepts with `-`.
pub fn remove_invalid_filename_chars(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}
