pub mod settings;

pub use settings::{default_data_dir, ClientSettings, API_KEY_ENV};
