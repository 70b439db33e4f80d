pub mod filter;
pub mod options;
pub mod pack_ignore;
pub mod task;

pub use filter::{ExportFilter, DEFAULT_IGNORED_DIRS, DEFAULT_IGNORED_NAMES};
pub use options::{normalize_output_path, remove_invalid_filename_chars, ExportOptions, ExportProvider};
pub use pack_ignore::PackIgnore;
pub use task::{ExportPlan, ExportTask};
