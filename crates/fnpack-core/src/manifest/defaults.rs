//! Default-merge rules for function and packaging settings.
//!
//! Rule everywhere: an explicit manifest value wins, otherwise the computed
//! default applies. Functions with `custom.build: false` get no computed
//! defaults at all.

use std::path::Path;

use serde::Serialize;

use super::schema::{Environment, FunctionDescriptor, PackageSection};

const PACK_DEVDEP_DEFAULT: bool = false;
const PACK_INDIVIDUALLY_DEFAULT: bool = true;
const PACK_EXCLUDE_DEFAULT: &str = "**";

/// `package.include` applied to a function that does not set one.
pub fn default_include(functions_dir: &str, name: &str) -> Vec<String> {
    vec![format!("{}/{}/build/**", functions_dir, name)]
}

/// Per-stage environment file of a function, relative to the project root.
pub fn default_env_file(functions_dir: &str, name: &str) -> String {
    format!("{}/{}/.env.yml", functions_dir, name)
}

/// Environment reference that loads the stage section of the env file.
pub fn default_environment(functions_dir: &str, name: &str) -> String {
    format!(
        "${{file({}):${{opt:stage, self:provider.stage}}}}",
        default_env_file(functions_dir, name)
    )
}

/// Function entry written into the manifest when scaffolding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionEntry {
    pub handler: String,
    pub package: EntryPackage,
    pub environment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPackage {
    pub include: Vec<String>,
}

impl FunctionEntry {
    pub fn scaffold(functions_dir: &str, name: &str) -> Self {
        Self {
            handler: format!("{}/{}/build/index.handler", functions_dir, name),
            package: EntryPackage {
                include: default_include(functions_dir, name),
            },
            environment: default_environment(functions_dir, name),
        }
    }
}

/// Effective service-level packaging options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDefaults {
    pub individually: bool,
    pub exclude_dev_dependencies: bool,
    pub exclude: Vec<String>,
}

impl PackageDefaults {
    pub fn resolve(section: &PackageSection) -> Self {
        Self {
            individually: section.individually.unwrap_or(PACK_INDIVIDUALLY_DEFAULT),
            exclude_dev_dependencies: section
                .exclude_dev_dependencies
                .unwrap_or(PACK_DEVDEP_DEFAULT),
            exclude: section
                .exclude
                .clone()
                .unwrap_or_else(|| vec![PACK_EXCLUDE_DEFAULT.to_string()]),
        }
    }
}

/// Effective settings of one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSettings {
    pub name: String,
    pub folder: String,
    pub disabled: bool,
    pub root_dir: Option<String>,
    pub include: Vec<String>,
    pub environment: Option<Environment>,
}

impl FunctionSettings {
    /// Merge a descriptor with computed defaults.
    ///
    /// The default environment reference is only applied when the function's
    /// env file exists under `project_root`.
    pub fn resolve(descriptor: &FunctionDescriptor, functions_dir: &str, project_root: &Path) -> Self {
        let name = descriptor.name.as_str();

        let (include, environment) = if descriptor.disabled {
            (
                descriptor.include.clone().unwrap_or_default(),
                descriptor.environment.clone(),
            )
        } else {
            let include = descriptor
                .include
                .clone()
                .unwrap_or_else(|| default_include(functions_dir, name));
            let environment = descriptor.environment.clone().or_else(|| {
                project_root
                    .join(default_env_file(functions_dir, name))
                    .exists()
                    .then(|| Environment::Reference(default_environment(functions_dir, name)))
            });
            (include, environment)
        };

        Self {
            name: name.to_string(),
            folder: descriptor.folder().to_string(),
            disabled: descriptor.disabled,
            root_dir: descriptor.root_dir.clone(),
            include,
            environment,
        }
    }
}
