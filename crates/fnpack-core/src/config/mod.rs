//! Tool configuration (`fnpack.toml`).
//!
//! The file is optional and lives at the project root next to the service
//! manifest. It only describes where things are and which tools to call;
//! function configuration itself always comes from the service manifest.

pub mod parser;
pub mod schema;
pub mod store;

pub use parser::{parse_settings_toml, parse_settings_toml_str};
pub use schema::FnpackSettings;
pub use store::{SETTINGS_FILE, SettingsStore};
