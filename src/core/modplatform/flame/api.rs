use serde::de::DeserializeOwned;
use tracing::info;

use super::models::{Envelope, FingerprintMatches, FlameCategory, FlameFile, FlameMod};
use super::requests::FlameRequests;
use crate::core::error::{PackError, PackResult};
use crate::core::http::HttpFetch;
use crate::core::modplatform::index::{
    Category, DependencySearchArgs, IndexedVersion, RequestDescriptor, ResourceType, SearchArgs,
    VersionSearchArgs,
};
use crate::core::modplatform::loader::ModLoaderType;
use crate::core::modplatform::resolver::{filter_versions, select_best_version};

/// CurseForge client: builds descriptors, hands them to the fetcher and
/// parses the `{ "data": ... }` responses.
pub struct FlameApi<F: HttpFetch> {
    fetcher: F,
    requests: FlameRequests,
}

impl<F: HttpFetch> FlameApi<F> {
    pub fn new(fetcher: F, requests: FlameRequests) -> Self {
        Self { fetcher, requests }
    }

    pub fn requests(&self) -> &FlameRequests {
        &self.requests
    }

    async fn get_data<T: DeserializeOwned>(&self, request: RequestDescriptor) -> PackResult<T> {
        let body = self.fetcher.fetch(&request).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|e| {
            PackError::Response(format!("{} returned an unexpected payload: {}", request.url, e))
        })?;
        Ok(envelope.data)
    }

    // ── Projects ────────────────────────────────────────

    pub async fn search(&self, args: &SearchArgs) -> PackResult<Vec<FlameMod>> {
        self.get_data(self.requests.search(args)).await
    }

    pub async fn project(&self, addon_id: &str) -> PackResult<FlameMod> {
        self.get_data(self.requests.info(addon_id)).await
    }

    pub async fn projects(&self, addon_ids: &[String]) -> PackResult<Vec<FlameMod>> {
        self.get_data(self.requests.projects(addon_ids)).await
    }

    pub async fn mod_description(&self, addon_id: &str) -> PackResult<String> {
        self.get_data(self.requests.description(addon_id)).await
    }

    // ── Files ───────────────────────────────────────────

    /// Files as filtered server-side by the versions endpoint.
    pub async fn versions(&self, args: &VersionSearchArgs) -> PackResult<Vec<IndexedVersion>> {
        let files: Vec<FlameFile> = self.get_data(self.requests.versions(args)).await?;
        Ok(files.into_iter().map(FlameFile::into_indexed).collect())
    }

    /// Files matching every filter in `args`, including the ones the
    /// endpoint cannot encode.
    pub async fn latest_versions(&self, args: &VersionSearchArgs) -> PackResult<Vec<IndexedVersion>> {
        let versions = self.versions(args).await?;
        let total = versions.len();
        let filtered = filter_versions(versions, args);
        info!(
            "Project {}: {} of {} files match the requested filters",
            args.addon_id,
            filtered.len(),
            total
        );
        Ok(filtered)
    }

    /// Fetch the files of a project and pick the one to install.
    ///
    /// The loader filter is widened with `fallback` so files for the
    /// fallback loader survive until the resolver sees them.
    pub async fn latest_version(
        &self,
        args: &VersionSearchArgs,
        instance_loaders: &[ModLoaderType],
        fallback: ModLoaderType,
        game_version: &str,
    ) -> PackResult<Option<IndexedVersion>> {
        let widened = VersionSearchArgs {
            loaders: args.loaders.map(|loaders| loaders.with(fallback)),
            ..args.clone()
        };
        let versions = self.latest_versions(&widened).await?;
        Ok(select_best_version(&versions, instance_loaders, fallback, game_version).cloned())
    }

    pub async fn dependency_versions(
        &self,
        args: &DependencySearchArgs,
    ) -> PackResult<Vec<IndexedVersion>> {
        let files: Vec<FlameFile> = self.get_data(self.requests.dependency(args)).await?;
        Ok(files.into_iter().map(FlameFile::into_indexed).collect())
    }

    pub async fn file(&self, addon_id: &str, file_id: &str) -> PackResult<IndexedVersion> {
        let file: FlameFile = self.get_data(self.requests.file(addon_id, file_id)).await?;
        Ok(file.into_indexed())
    }

    pub async fn files(&self, file_ids: &[String]) -> PackResult<Vec<IndexedVersion>> {
        let files: Vec<FlameFile> = self.get_data(self.requests.files(file_ids)).await?;
        Ok(files.into_iter().map(FlameFile::into_indexed).collect())
    }

    pub async fn file_changelog(&self, addon_id: &str, file_id: &str) -> PackResult<String> {
        self.get_data(self.requests.file_changelog(addon_id, file_id))
            .await
    }

    pub async fn match_fingerprints(&self, fingerprints: &[u32]) -> PackResult<FingerprintMatches> {
        let matches: FingerprintMatches = self
            .get_data(self.requests.fingerprints(fingerprints))
            .await?;
        info!(
            "Fingerprint lookup: {} matched, {} unmatched",
            matches.exact_matches.len(),
            matches.unmatched_fingerprints.len()
        );
        Ok(matches)
    }

    // ── Reference data ──────────────────────────────────

    pub async fn categories(&self, resource_type: ResourceType) -> PackResult<Vec<Category>> {
        let categories: Vec<FlameCategory> =
            self.get_data(self.requests.categories(resource_type)).await?;
        Ok(categories.into_iter().map(Category::from).collect())
    }
}
