// ─── Version Resolver ───
// Chooses which published build of a package to install into an instance.
// Candidates are taken in the provider's order (newest first on CurseForge)
// and never re-sorted: the first compatible entry wins.

use tracing::debug;

use super::index::{IndexedVersion, VersionSearchArgs};
use super::loader::{ModLoaderType, ModLoaders};

/// Pick the best version for an instance running `game_version`.
///
/// Candidates sharing any loader with `instance_loaders` are preferred;
/// otherwise the first candidate targeting `fallback` is taken. `None` means
/// the package has no build for this instance, which is not an error.
pub fn select_best_version<'a>(
    candidates: &'a [IndexedVersion],
    instance_loaders: &[ModLoaderType],
    fallback: ModLoaderType,
    game_version: &str,
) -> Option<&'a IndexedVersion> {
    let wanted: ModLoaders = instance_loaders.iter().copied().collect();

    let first_matching = |loaders: ModLoaders| {
        candidates
            .iter()
            .find(|v| v.loaders.intersects(loaders) && v.supports_game_version(game_version))
    };

    let best = first_matching(wanted).or_else(|| first_matching(ModLoaders::only(fallback)));

    match best {
        Some(v) => debug!(
            "Resolved {} -> file {} ({}) for {}",
            v.addon_id, v.file_id, v.loaders, game_version
        ),
        None => debug!(
            "No compatible version among {} candidates for {} [{}], fallback {}",
            candidates.len(),
            game_version,
            wanted,
            fallback
        ),
    }

    best
}

/// Apply the parts of `args` the files endpoint cannot express: a loader
/// filter with several loaders and the full list of accepted game versions.
/// Order is preserved.
pub fn filter_versions(versions: Vec<IndexedVersion>, args: &VersionSearchArgs) -> Vec<IndexedVersion> {
    versions
        .into_iter()
        .filter(|v| match args.loaders {
            Some(loaders) if !loaders.is_empty() => v.loaders.intersects(loaders),
            _ => true,
        })
        .filter(|v| match &args.mc_versions {
            Some(mc) if !mc.is_empty() => mc.iter().any(|m| v.supports_game_version(m)),
            _ => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::modplatform::index::ReleaseType;

    fn version(id: &str, loaders: &[ModLoaderType], mc: &[&str]) -> IndexedVersion {
        IndexedVersion {
            addon_id: "1".into(),
            file_id: id.into(),
            version: id.into(),
            file_name: format!("{id}.jar"),
            download_url: None,
            loaders: loaders.iter().copied().collect(),
            mc_versions: mc.iter().map(|s| s.to_string()).collect(),
            date: None,
            hash: None,
            release_type: ReleaseType::Release,
        }
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        assert!(select_best_version(&[], &[ModLoaderType::Fabric], ModLoaderType::Forge, "1.20").is_none());
    }

    #[test]
    fn instance_loader_beats_earlier_candidate() {
        let candidates = vec![
            version("A", &[ModLoaderType::Forge], &["1.20"]),
            version("B", &[ModLoaderType::Fabric], &["1.20"]),
        ];
        let best = select_best_version(&candidates, &[ModLoaderType::Fabric], ModLoaderType::Forge, "1.20");
        assert_eq!(best.map(|v| v.file_id.as_str()), Some("B"));
    }

    #[test]
    fn falls_back_to_fallback_loader() {
        let candidates = vec![version("A", &[ModLoaderType::Forge], &["1.19"])];
        let best = select_best_version(&candidates, &[ModLoaderType::Fabric], ModLoaderType::Forge, "1.19");
        assert_eq!(best.map(|v| v.file_id.as_str()), Some("A"));
    }

    #[test]
    fn game_version_is_always_required() {
        let candidates = vec![
            version("A", &[ModLoaderType::Fabric], &["1.18.2"]),
            version("B", &[ModLoaderType::Forge], &["1.18.2"]),
        ];
        let best = select_best_version(&candidates, &[ModLoaderType::Fabric], ModLoaderType::Forge, "1.20.1");
        assert!(best.is_none());
    }

    #[test]
    fn ties_go_to_input_order() {
        let candidates = vec![
            version("new", &[ModLoaderType::Quilt, ModLoaderType::Fabric], &["1.20.1"]),
            version("old", &[ModLoaderType::Fabric], &["1.20.1"]),
        ];
        let best = select_best_version(
            &candidates,
            &[ModLoaderType::Fabric, ModLoaderType::Quilt],
            ModLoaderType::Fabric,
            "1.20.1",
        );
        assert_eq!(best.map(|v| v.file_id.as_str()), Some("new"));
    }

    #[test]
    fn client_side_filter_handles_loader_sets() {
        let versions = vec![
            version("forge", &[ModLoaderType::Forge], &["1.20.1"]),
            version("quilt", &[ModLoaderType::Quilt], &["1.20.1"]),
            version("fabric-old", &[ModLoaderType::Fabric], &["1.19.4"]),
            version("fabric", &[ModLoaderType::Fabric], &["1.20"]),
        ];
        let args = VersionSearchArgs {
            addon_id: "1".into(),
            mc_versions: Some(vec!["1.20.1".into(), "1.20".into()]),
            loaders: Some(ModLoaders::only(ModLoaderType::Fabric).with(ModLoaderType::Quilt)),
        };
        let ids: Vec<String> = filter_versions(versions, &args)
            .into_iter()
            .map(|v| v.file_id)
            .collect();
        assert_eq!(ids, vec!["quilt".to_string(), "fabric".to_string()]);
    }
}
