pub mod fingerprint;
pub mod flame;
pub mod index;
pub mod loader;
pub mod resolver;

pub use index::{
    Category, DependencySearchArgs, HttpMethod, IndexedVersion, ReleaseType, RequestDescriptor,
    ResourceType, SearchArgs, SortingMethod, VersionSearchArgs,
};
pub use loader::{ModLoaderType, ModLoaders};
pub use resolver::{filter_versions, select_best_version};
