//! Service manifest access: parsed snapshot, raw text and text patching.
//!
//! Reads go through [`ServiceManifest`], a typed snapshot rebuilt on every
//! invocation. Writes never re-serialize the YAML; they go through a
//! [`ManifestEditor`] operating on the raw [`ManifestDocument`] lines and
//! return a new document.

pub mod defaults;
pub mod document;
pub mod patcher;
pub mod schema;
pub mod store;

pub use defaults::{FunctionEntry, FunctionSettings, PackageDefaults};
pub use document::ManifestDocument;
pub use patcher::LinePatcher;
pub use schema::{Environment, FunctionDescriptor, PackageSection, ServiceManifest};
pub use store::{LoadedManifest, ManifestStore};

use crate::error::FnpackError;

/// Edits function entries in manifest text.
pub trait ManifestEditor: Send + Sync {
    /// Insert an inert block for `name` under `functions:`.
    fn insert_function(
        &self,
        document: &ManifestDocument,
        name: &str,
        entry: &FunctionEntry,
    ) -> Result<ManifestDocument, FnpackError>;

    /// Remove the block of `name`.
    fn remove_function(
        &self,
        document: &ManifestDocument,
        name: &str,
    ) -> Result<ManifestDocument, FnpackError>;
}
