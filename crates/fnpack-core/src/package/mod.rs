//! Function subproject descriptors (`package.json`).

pub mod descriptor;

pub use descriptor::PackageDescriptor;
