// ─── CurseForge Request Builder ───
// Pure mapping from typed arguments to request descriptors. Nothing here
// performs I/O and nothing here fails: absent options are simply omitted.
//
// The search endpoint cannot combine several game versions and the files
// endpoint only filters on one loader, so callers over-fetch and finish the
// filtering client-side (see `resolver::filter_versions`).

use serde_json::json;

use crate::core::modplatform::index::{
    DependencySearchArgs, RequestDescriptor, ResourceType, SearchArgs, SortingMethod,
    VersionSearchArgs,
};
use crate::core::modplatform::loader::{ModLoaderType, ModLoaders};

pub const FLAME_API_BASE: &str = "https://api.curseforge.com";

/// CurseForge game id for Minecraft.
const MINECRAFT_GAME_ID: u32 = 432;
const SEARCH_PAGE_SIZE: u32 = 25;
/// Large enough to list every file of a project in one page.
const FILES_PAGE_SIZE: u32 = 10000;

/// Loaders the search filter understands, in the order they are rendered.
const SEARCH_LOADER_ORDER: [ModLoaderType; 4] = [
    ModLoaderType::NeoForge,
    ModLoaderType::Forge,
    ModLoaderType::Fabric,
    ModLoaderType::Quilt,
];

/// Provider class id of a resource type.
pub fn class_id(resource_type: ResourceType) -> u32 {
    match resource_type {
        ResourceType::Mod => 6,
        ResourceType::ResourcePack => 12,
        ResourceType::ShaderPack => 6552,
        ResourceType::Modpack => 4471,
    }
}

/// https://docs.curseforge.com/?http#tocS_ModLoaderType
pub fn mod_loader_code(loader: ModLoaderType) -> u32 {
    match loader {
        ModLoaderType::Forge => 1,
        ModLoaderType::Cauldron => 2,
        ModLoaderType::LiteLoader => 3,
        ModLoaderType::Fabric => 4,
        ModLoaderType::Quilt => 5,
        ModLoaderType::NeoForge => 6,
    }
}

pub fn mod_loader_from_code(code: u32) -> Option<ModLoaderType> {
    ModLoaderType::ALL
        .into_iter()
        .find(|loader| mod_loader_code(*loader) == code)
}

/// `[6,1,4,5]`-style list of the searchable loaders in `loaders`.
fn mod_loader_filter(loaders: ModLoaders) -> String {
    let codes: Vec<String> = SEARCH_LOADER_ORDER
        .into_iter()
        .filter(|loader| loaders.contains(*loader))
        .map(|loader| mod_loader_code(loader).to_string())
        .collect();
    format!("[{}]", codes.join(","))
}

/// Sort orders offered by the search endpoint.
pub fn sorting_methods() -> Vec<SortingMethod> {
    vec![
        SortingMethod::new(1, "Featured", "Sort by Featured"),
        SortingMethod::new(2, "Popularity", "Sort by Popularity"),
        SortingMethod::new(3, "LastUpdated", "Sort by Last Updated"),
        SortingMethod::new(4, "Name", "Sort by Name"),
        SortingMethod::new(5, "Author", "Sort by Author"),
        SortingMethod::new(6, "TotalDownloads", "Sort by Downloads"),
    ]
}

/// Builds CurseForge request descriptors against a configurable API base.
#[derive(Debug, Clone)]
pub struct FlameRequests {
    api_base: String,
}

impl Default for FlameRequests {
    fn default() -> Self {
        Self::new(FLAME_API_BASE)
    }
}

impl FlameRequests {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    // ── Listing endpoints ───────────────────────────────

    pub fn search(&self, args: &SearchArgs) -> RequestDescriptor {
        let mut get_arguments = vec![
            format!("classId={}", class_id(args.resource_type)),
            format!("index={}", args.offset),
            format!("pageSize={}", SEARCH_PAGE_SIZE),
        ];

        if let Some(search) = &args.search {
            get_arguments.push(format!("searchFilter={}", search));
        }
        if let Some(sorting) = &args.sorting {
            get_arguments.push(format!("sortField={}", sorting.index));
        }
        get_arguments.push("sortOrder=desc".to_string());

        if let Some(loaders) = args.loaders.filter(|l| !l.is_empty()) {
            get_arguments.push(format!("modLoaderTypes={}", mod_loader_filter(loaders)));
        }
        if let Some(ids) = args.category_ids.as_ref().filter(|ids| !ids.is_empty()) {
            get_arguments.push(format!("categoryIds=[{}]", ids.join(",")));
        }
        // Only one game version can be searched at a time.
        if let Some(version) = args.versions.as_ref().and_then(|v| v.first()) {
            get_arguments.push(format!("gameVersion={}", version));
        }

        RequestDescriptor::get(format!(
            "{}/v1/mods/search?gameId={}&{}",
            self.api_base,
            MINECRAFT_GAME_ID,
            get_arguments.join("&")
        ))
    }

    pub fn versions(&self, args: &VersionSearchArgs) -> RequestDescriptor {
        let mut url = format!(
            "{}/v1/mods/{}/files?pageSize={}",
            self.api_base, args.addon_id, FILES_PAGE_SIZE
        );

        if let Some(version) = args.mc_versions.as_ref().and_then(|v| v.first()) {
            url.push_str(&format!("&gameVersion={}", version));
        }
        if let Some(loader) = args.loaders.and_then(ModLoaders::single) {
            url.push_str(&format!("&modLoaderType={}", mod_loader_code(loader)));
        }

        RequestDescriptor::get(url)
    }

    pub fn dependency(&self, args: &DependencySearchArgs) -> RequestDescriptor {
        let mut url = format!(
            "{}/v1/mods/{}/files?pageSize={}&gameVersion={}",
            self.api_base, args.addon_id, FILES_PAGE_SIZE, args.mc_version
        );

        if let Some(loader) = args.loader.and_then(ModLoaders::single) {
            url.push_str(&format!("&modLoaderType={}", mod_loader_code(loader)));
        }

        RequestDescriptor::get(url)
    }

    pub fn categories(&self, resource_type: ResourceType) -> RequestDescriptor {
        RequestDescriptor::get(format!(
            "{}/v1/categories?gameId={}&classId={}",
            self.api_base,
            MINECRAFT_GAME_ID,
            class_id(resource_type)
        ))
    }

    // ── Single-item endpoints ───────────────────────────

    pub fn info(&self, addon_id: &str) -> RequestDescriptor {
        RequestDescriptor::get(format!("{}/v1/mods/{}", self.api_base, addon_id))
    }

    pub fn file(&self, addon_id: &str, file_id: &str) -> RequestDescriptor {
        RequestDescriptor::get(format!(
            "{}/v1/mods/{}/files/{}",
            self.api_base, addon_id, file_id
        ))
    }

    pub fn file_changelog(&self, addon_id: &str, file_id: &str) -> RequestDescriptor {
        RequestDescriptor::get(format!(
            "{}/v1/mods/{}/files/{}/changelog",
            self.api_base, addon_id, file_id
        ))
    }

    pub fn description(&self, addon_id: &str) -> RequestDescriptor {
        RequestDescriptor::get(format!("{}/v1/mods/{}/description", self.api_base, addon_id))
    }

    // ── Batch endpoints (POST) ──────────────────────────

    pub fn projects(&self, addon_ids: &[String]) -> RequestDescriptor {
        RequestDescriptor::post(
            format!("{}/v1/mods", self.api_base),
            json!({ "modIds": numeric_ids(addon_ids) }),
        )
    }

    pub fn files(&self, file_ids: &[String]) -> RequestDescriptor {
        RequestDescriptor::post(
            format!("{}/v1/mods/files", self.api_base),
            json!({ "fileIds": numeric_ids(file_ids) }),
        )
    }

    pub fn fingerprints(&self, fingerprints: &[u32]) -> RequestDescriptor {
        RequestDescriptor::post(
            format!("{}/v1/fingerprints", self.api_base),
            json!({ "fingerprints": fingerprints }),
        )
    }
}

/// CurseForge expects numeric ids in batch bodies; ids that are not numbers
/// are passed through as strings and left for the provider to reject.
fn numeric_ids(ids: &[String]) -> Vec<serde_json::Value> {
    ids.iter()
        .map(|id| match id.parse::<u64>() {
            Ok(n) => json!(n),
            Err(_) => json!(id),
        })
        .collect()
}
