pub mod api;
pub mod models;
pub mod requests;

pub use api::FlameApi;
pub use models::{FingerprintMatch, FingerprintMatches, FlameFile, FlameMod};
pub use requests::{
    class_id, mod_loader_code, mod_loader_from_code, sorting_methods, FlameRequests,
    FLAME_API_BASE,
};
