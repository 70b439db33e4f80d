use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{PackError, PackResult};

/// Mod loaders a package version can target — strongly typed, no magic numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModLoaderType {
    NeoForge,
    Forge,
    Cauldron,
    LiteLoader,
    Fabric,
    Quilt,
}

impl ModLoaderType {
    /// Every known loader, in bit order.
    pub const ALL: [ModLoaderType; 6] = [
        ModLoaderType::NeoForge,
        ModLoaderType::Forge,
        ModLoaderType::Cauldron,
        ModLoaderType::LiteLoader,
        ModLoaderType::Fabric,
        ModLoaderType::Quilt,
    ];

    const fn bit(self) -> u8 {
        match self {
            ModLoaderType::NeoForge => 1 << 0,
            ModLoaderType::Forge => 1 << 1,
            ModLoaderType::Cauldron => 1 << 2,
            ModLoaderType::LiteLoader => 1 << 3,
            ModLoaderType::Fabric => 1 << 4,
            ModLoaderType::Quilt => 1 << 5,
        }
    }

    /// Lowercase identifier used in instance metadata and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ModLoaderType::NeoForge => "neoforge",
            ModLoaderType::Forge => "forge",
            ModLoaderType::Cauldron => "cauldron",
            ModLoaderType::LiteLoader => "liteloader",
            ModLoaderType::Fabric => "fabric",
            ModLoaderType::Quilt => "quilt",
        }
    }

    /// Recognise the loader tags CurseForge mixes into a file's
    /// `gameVersions` list (`"Forge"`, `"NeoForge"`, ...).
    pub fn from_game_version_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|loader| loader.as_str().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for ModLoaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModLoaderType {
    type Err = PackError;

    fn from_str(s: &str) -> PackResult<Self> {
        Self::from_game_version_tag(s.trim()).ok_or_else(|| PackError::InvalidLoader(s.to_string()))
    }
}

/// A set of mod loaders backed by a fixed-size bit set.
///
/// Iteration always follows [`ModLoaderType::ALL`], never insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModLoaders(u8);

impl ModLoaders {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn only(loader: ModLoaderType) -> Self {
        Self(loader.bit())
    }

    pub fn insert(&mut self, loader: ModLoaderType) {
        self.0 |= loader.bit();
    }

    pub fn with(mut self, loader: ModLoaderType) -> Self {
        self.insert(loader);
        self
    }

    pub fn contains(self, loader: ModLoaderType) -> bool {
        self.0 & loader.bit() != 0
    }

    pub fn intersects(self, other: ModLoaders) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The loader when exactly one bit is set.
    pub fn single(self) -> Option<ModLoaderType> {
        if self.len() != 1 {
            return None;
        }
        self.iter().next()
    }

    pub fn iter(self) -> impl Iterator<Item = ModLoaderType> {
        ModLoaderType::ALL
            .into_iter()
            .filter(move |loader| self.contains(*loader))
    }

    /// Whether CurseForge can filter on at least one loader of this set.
    pub fn validate_for_flame(self) -> bool {
        [
            ModLoaderType::NeoForge,
            ModLoaderType::Forge,
            ModLoaderType::Fabric,
            ModLoaderType::Quilt,
        ]
        .into_iter()
        .any(|loader| self.contains(loader))
    }
}

impl From<ModLoaderType> for ModLoaders {
    fn from(loader: ModLoaderType) -> Self {
        Self::only(loader)
    }
}

impl FromIterator<ModLoaderType> for ModLoaders {
    fn from_iter<I: IntoIterator<Item = ModLoaderType>>(iter: I) -> Self {
        let mut set = Self::empty();
        for loader in iter {
            set.insert(loader);
        }
        set
    }
}

impl fmt::Display for ModLoaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(ModLoaderType::as_str).collect();
        write!(f, "{}", names.join(","))
    }
}

// Persisted as a list of loader names, e.g. `["fabric","quilt"]`.
impl Serialize for ModLoaders {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ModLoaders {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let loaders = Vec::<ModLoaderType>::deserialize(deserializer)?;
        Ok(loaders.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_requires_exactly_one_bit() {
        assert_eq!(ModLoaders::empty().single(), None);
        assert_eq!(
            ModLoaders::only(ModLoaderType::Quilt).single(),
            Some(ModLoaderType::Quilt)
        );
        let both = ModLoaders::only(ModLoaderType::Fabric).with(ModLoaderType::Quilt);
        assert_eq!(both.single(), None);
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn iteration_ignores_insertion_order() {
        let set: ModLoaders = [ModLoaderType::Quilt, ModLoaderType::Forge, ModLoaderType::NeoForge]
            .into_iter()
            .collect();
        let order: Vec<_> = set.iter().collect();
        assert_eq!(
            order,
            vec![ModLoaderType::NeoForge, ModLoaderType::Forge, ModLoaderType::Quilt]
        );
    }

    #[test]
    fn flame_validation_ignores_legacy_loaders() {
        let legacy = ModLoaders::only(ModLoaderType::Cauldron).with(ModLoaderType::LiteLoader);
        assert!(!legacy.validate_for_flame());
        assert!(legacy.with(ModLoaderType::Fabric).validate_for_flame());
    }

    #[test]
    fn parse_game_version_tags() {
        assert_eq!(
            ModLoaderType::from_game_version_tag("NeoForge"),
            Some(ModLoaderType::NeoForge)
        );
        assert_eq!(ModLoaderType::from_game_version_tag("1.20.1"), None);
        assert!("rift".parse::<ModLoaderType>().is_err());
    }

    #[test]
    fn serde_as_name_list() {
        let set = ModLoaders::only(ModLoaderType::Quilt).with(ModLoaderType::Fabric);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["fabric","quilt"]"#);
        let back: ModLoaders = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
