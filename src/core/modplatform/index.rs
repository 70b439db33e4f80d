// ─── Mod Index ───
// Provider-neutral value types exchanged between the request builders,
// the API client and the version resolver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::loader::ModLoaders;

/// Category of distributable package.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[default]
    Mod,
    ResourcePack,
    ShaderPack,
    Modpack,
}

/// A sort order offered by a provider's search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingMethod {
    /// Provider-side numeric identifier.
    pub index: u32,
    pub name: String,
    pub readable_name: String,
}

impl SortingMethod {
    pub fn new(index: u32, name: &str, readable_name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            readable_name: readable_name.to_string(),
        }
    }
}

/// Arguments of a single search request.
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub resource_type: ResourceType,
    pub offset: u32,
    pub search: Option<String>,
    pub sorting: Option<SortingMethod>,
    pub loaders: Option<ModLoaders>,
    pub category_ids: Option<Vec<String>>,
    /// Ordered, most preferred first.
    pub versions: Option<Vec<String>>,
}

/// Arguments for listing the published files of one package.
#[derive(Debug, Clone, Default)]
pub struct VersionSearchArgs {
    pub addon_id: String,
    /// Ordered, most preferred first.
    pub mc_versions: Option<Vec<String>>,
    pub loaders: Option<ModLoaders>,
}

/// Arguments for resolving a dependency against one game version.
#[derive(Debug, Clone)]
pub struct DependencySearchArgs {
    pub addon_id: String,
    pub mc_version: String,
    pub loader: Option<ModLoaders>,
}

/// Release channel of a published file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    #[default]
    Release,
    Beta,
    Alpha,
}

/// One published build of a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedVersion {
    pub addon_id: String,
    pub file_id: String,
    /// Human readable version name.
    pub version: String,
    pub file_name: String,
    pub download_url: Option<String>,
    pub loaders: ModLoaders,
    pub mc_versions: Vec<String>,
    pub date: Option<DateTime<Utc>>,
    /// Lowercase hex SHA-1 when the provider publishes one.
    pub hash: Option<String>,
    pub release_type: ReleaseType,
}

impl IndexedVersion {
    pub fn supports_game_version(&self, game_version: &str) -> bool {
        self.mc_versions.iter().any(|v| v == game_version)
    }
}

/// Provider category, read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// What the HTTP collaborator needs to issue one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl RequestDescriptor {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    /// Query part of the URL, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, query)| query)
    }

    /// Keys of the query string, in order.
    pub fn query_keys(&self) -> Vec<&str> {
        self.query()
            .map(|q| {
                q.split('&')
                    .filter_map(|pair| pair.split('=').next())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query()?
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}
