pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::error::{PackError, PackResult};
pub use crate::core::export::{ExportFilter, ExportOptions, ExportPlan, ExportProvider, ExportTask, PackIgnore};
pub use crate::core::http::{build_http_client, HttpFetch, ReqwestFetcher};
pub use crate::core::instance::Instance;
pub use crate::core::modplatform::flame::{FlameApi, FlameRequests};
pub use crate::core::modplatform::{
    select_best_version, IndexedVersion, ModLoaderType, ModLoaders, SearchArgs, VersionSearchArgs,
};
pub use crate::core::state::ClientSettings;

/// Install the structured logging subscriber.
///
/// `RUST_LOG` wins when set. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,packkit=debug")),
        )
        .try_init();
}

/// CurseForge client configured from `settings`.
pub fn flame_client(settings: &ClientSettings) -> PackResult<FlameApi<ReqwestFetcher>> {
    let fetcher = ReqwestFetcher::from_settings(settings)?;
    Ok(FlameApi::new(fetcher, FlameRequests::new(&settings.api_base)))
}
