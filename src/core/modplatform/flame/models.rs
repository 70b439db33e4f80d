use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::modplatform::index::{Category, IndexedVersion, ReleaseType};
use crate::core::modplatform::loader::{ModLoaderType, ModLoaders};

/// CurseForge wraps every payload in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// `hashes[].algo` value for SHA-1.
const HASH_ALGO_SHA1: u32 = 1;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlameHash {
    pub value: String,
    pub algo: u32,
}

/// A file entry as returned by the files endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlameFile {
    pub id: u64,
    pub mod_id: u64,
    pub display_name: String,
    pub file_name: String,
    #[serde(default = "default_release_type")]
    pub release_type: u8,
    #[serde(default)]
    pub file_date: Option<DateTime<Utc>>,
    /// `null` for projects that opted out of third-party distribution.
    #[serde(default)]
    pub download_url: Option<String>,
    /// Game versions interleaved with loader and environment tags.
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub hashes: Vec<FlameHash>,
}

fn default_release_type() -> u8 {
    1
}

impl FlameFile {
    pub fn sha1(&self) -> Option<&str> {
        self.hashes
            .iter()
            .find(|h| h.algo == HASH_ALGO_SHA1)
            .map(|h| h.value.as_str())
    }

    pub fn into_indexed(self) -> IndexedVersion {
        let mut loaders = ModLoaders::empty();
        let mut mc_versions = Vec::new();

        for tag in &self.game_versions {
            if let Some(loader) = ModLoaderType::from_game_version_tag(tag) {
                loaders.insert(loader);
            } else if tag.starts_with(|c: char| c.is_ascii_digit()) {
                mc_versions.push(tag.clone());
            }
        }

        let release_type = match self.release_type {
            2 => ReleaseType::Beta,
            3 => ReleaseType::Alpha,
            _ => ReleaseType::Release,
        };

        IndexedVersion {
            addon_id: self.mod_id.to_string(),
            file_id: self.id.to_string(),
            hash: self.sha1().map(str::to_lowercase),
            version: self.display_name,
            file_name: self.file_name,
            download_url: self.download_url,
            loaders,
            mc_versions,
            date: self.file_date,
            release_type,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlameAuthor {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlameLinks {
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub issues_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlameLogo {
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// A project entry from search or info requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlameMod {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub download_count: f64,
    #[serde(default)]
    pub class_id: Option<u32>,
    #[serde(default)]
    pub authors: Vec<FlameAuthor>,
    #[serde(default)]
    pub links: FlameLinks,
    #[serde(default)]
    pub logo: Option<FlameLogo>,
    #[serde(default)]
    pub latest_files: Vec<FlameFile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlameCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub class_id: Option<u32>,
}

impl From<FlameCategory> for Category {
    fn from(c: FlameCategory) -> Self {
        Category {
            id: c.id.to_string(),
            name: c.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintMatch {
    pub id: u64,
    pub file: FlameFile,
    #[serde(default)]
    pub latest_files: Vec<FlameFile>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintMatches {
    #[serde(default)]
    pub exact_matches: Vec<FingerprintMatch>,
    #[serde(default)]
    pub exact_fingerprints: Vec<u32>,
    #[serde(default)]
    pub unmatched_fingerprints: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_tags_split_into_loaders_and_versions() {
        let json = r#"{
            "id": 4571,
            "modId": 238222,
            "displayName": "jei-1.20.1-forge-15.2.0.27.jar",
            "fileName": "jei-1.20.1-forge-15.2.0.27.jar",
            "releaseType": 2,
            "fileDate": "2023-09-12T10:00:00Z",
            "downloadUrl": null,
            "gameVersions": ["Forge", "1.20.1", "NeoForge", "Client", "Java 17"],
            "hashes": [
                { "value": "ABCDEF", "algo": 1 },
                { "value": "0011", "algo": 2 }
            ]
        }"#;
        let file: FlameFile = serde_json::from_str(json).unwrap();
        let version = file.into_indexed();
        assert_eq!(version.addon_id, "238222");
        assert_eq!(version.file_id, "4571");
        assert_eq!(version.mc_versions, vec!["1.20.1".to_string()]);
        assert!(version.loaders.contains(ModLoaderType::Forge));
        assert!(version.loaders.contains(ModLoaderType::NeoForge));
        assert_eq!(version.loaders.len(), 2);
        assert_eq!(version.release_type, ReleaseType::Beta);
        assert_eq!(version.hash.as_deref(), Some("abcdef"));
        assert_eq!(version.download_url, None);
        assert!(version.date.is_some());
    }

    #[test]
    fn category_envelope() {
        let json = r#"{ "data": [ { "id": 406, "name": "World Gen", "classId": 6 } ] }"#;
        let env: Envelope<Vec<FlameCategory>> = serde_json::from_str(json).unwrap();
        let cats: Vec<Category> = env.data.into_iter().map(Category::from).collect();
        assert_eq!(
            cats,
            vec![Category {
                id: "406".into(),
                name: "World Gen".into()
            }]
        );
    }
}
