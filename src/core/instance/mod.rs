pub mod model;

pub use model::{Instance, GAME_DIR_NAME};
