//! Read-only snapshot of the service manifest.
//!
//! Only the parts fnpack cares about are extracted: the service name, the
//! provider stage, the service-level `package` section and the `functions`
//! map in declaration order. Everything else (resources, plugins, custom
//! tags such as `!Ref`) is accepted and ignored.

use std::fmt;

use anyhow::Context;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::Value;

use crate::config::parser::get_line_context;

/// Parsed view of the manifest, rebuilt on every invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceManifest {
    pub service: Option<String>,
    pub provider_stage: Option<String>,
    pub package: PackageSection,
    /// Functions in manifest order
    pub functions: Vec<FunctionDescriptor>,
}

/// Service-level `package:` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSection {
    #[serde(default)]
    pub individually: Option<bool>,
    #[serde(default)]
    pub exclude_dev_dependencies: Option<bool>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

/// One entry of the `functions:` map.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    pub name: String,
    /// `custom.rootDir`: folder name when it differs from the function name
    pub root_dir: Option<String>,
    /// `custom.build: false`
    pub disabled: bool,
    pub handler: Option<String>,
    /// `package.include`
    pub include: Option<Vec<String>>,
    pub environment: Option<Environment>,
}

/// A function's `environment:` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Variable reference such as `${file(...)}`
    Reference(String),
    /// Inline variables, in manifest order
    Variables(Vec<(String, String)>),
}

impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Environment::Reference(reference) => serializer.serialize_str(reference),
            Environment::Variables(variables) => {
                let mut map = serializer.serialize_map(Some(variables.len()))?;
                for (key, value) in variables {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Reference(reference) => f.write_str(reference),
            Environment::Variables(variables) => {
                let pairs: Vec<String> = variables.iter().map(|(k, v)| format!("{k}={v}")).collect();
                f.write_str(&pairs.join(", "))
            }
        }
    }
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_dir: None,
            disabled: false,
            handler: None,
            include: None,
            environment: None,
        }
    }

    /// Subproject folder name: `custom.rootDir`, else the function name.
    pub fn folder(&self) -> &str {
        self.root_dir.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawFunction {
    #[serde(default)]
    handler: Option<String>,
    #[serde(default)]
    custom: Option<RawCustom>,
    #[serde(default)]
    package: Option<RawFunctionPackage>,
    #[serde(default)]
    environment: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCustom {
    #[serde(default, rename = "rootDir")]
    root_dir: Option<String>,
    #[serde(default)]
    build: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFunctionPackage {
    #[serde(default)]
    include: Option<Vec<String>>,
}

impl ServiceManifest {
    /// Parse manifest text.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let root: Value = serde_yaml::from_str(content).map_err(|e| enhance_yaml_error(e, content))?;

        let root = match root {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(map) => map,
            _ => anyhow::bail!("Expected a YAML mapping at the manifest root"),
        };

        let service = match root.get("service") {
            Some(Value::String(name)) => Some(name.clone()),
            Some(Value::Mapping(map)) => map.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        };

        let provider_stage = root
            .get("provider")
            .and_then(|provider| provider.get("stage"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let package = match root.get("package") {
            Some(value) if value.is_mapping() => serde_yaml::from_value(value.clone())
                .context("Invalid service-level 'package' section")?,
            _ => PackageSection::default(),
        };

        let functions = match root.get("functions") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Mapping(map)) => {
                let mut functions = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let name = key
                        .as_str()
                        .ok_or_else(|| anyhow::anyhow!("Function names must be strings: {:?}", key))?;
                    functions.push(
                        parse_function(name, value)
                            .with_context(|| format!("Invalid configuration for function '{}'", name))?,
                    );
                }
                functions
            }
            Some(_) => anyhow::bail!("Expected 'functions' to be a mapping of function names"),
        };

        Ok(Self {
            service,
            provider_stage,
            package,
            functions,
        })
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn contains_function(&self, name: &str) -> bool {
        self.function(name).is_some()
    }
}

fn parse_function(name: &str, value: &Value) -> anyhow::Result<FunctionDescriptor> {
    let raw: RawFunction = match value {
        Value::Null => RawFunction::default(),
        Value::Mapping(_) => serde_yaml::from_value(value.clone())?,
        _ => anyhow::bail!("Expected a mapping"),
    };

    let custom = raw.custom.unwrap_or_default();
    let disabled = matches!(custom.build, Some(Value::Bool(false)));

    let environment = match raw.environment {
        None | Some(Value::Null) => None,
        Some(Value::String(reference)) => Some(Environment::Reference(reference)),
        Some(Value::Mapping(map)) => {
            let mut variables = Vec::with_capacity(map.len());
            for (key, value) in map {
                let key = key
                    .as_str()
                    .ok_or_else(|| anyhow::anyhow!("Environment variable names must be strings"))?;
                variables.push((key.to_string(), scalar_to_string(&value)));
            }
            Some(Environment::Variables(variables))
        }
        Some(_) => anyhow::bail!("Expected 'environment' to be a mapping or a variable reference"),
    };

    Ok(FunctionDescriptor {
        name: name.to_string(),
        root_dir: custom.root_dir,
        disabled,
        handler: raw.handler,
        include: raw.package.and_then(|p| p.include),
        environment,
    })
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn enhance_yaml_error(error: serde_yaml::Error, content: &str) -> anyhow::Error {
    match error.location() {
        Some(location) => {
            let context = get_line_context(content, location.line());
            anyhow::anyhow!(
                "YAML parsing error at line {}:\n{}\n\nError: {}",
                location.line(),
                context,
                error
            )
        }
        None => anyhow::anyhow!("YAML parsing error: {}", error),
    }
}
