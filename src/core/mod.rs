// ─── packkit Core ───
// Non-GUI backend of the launcher's mod browser and pack export dialog.
//
// Architecture:
//   core/
//     modplatform/ — Loader sets, CurseForge request builders + client,
//                    version resolver, file fingerprints
//     export/      — Export filter, .packignore, export options + task
//     instance/    — Instance model + sidecar paths
//     state/       — Client settings
//     http.rs      — HTTP fetch collaborator (reqwest)

pub mod error;
pub mod export;
pub mod http;
pub mod instance;
pub mod modplatform;
pub mod state;
