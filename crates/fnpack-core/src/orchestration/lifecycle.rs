//! Host lifecycle points fnpack attaches to.

use std::fmt;
use std::str::FromStr;

/// A unit of work run by a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStep {
    Clean,
    Build,
}

/// Packaging lifecycle events fired by the deployment tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleHook {
    /// `package:cleanup`
    PackageCleanup,
    /// `before:package:function:package`
    BeforePackageFunction,
    /// `before:package:createDeploymentArtifacts`
    BeforeCreateDeploymentArtifacts,
}

impl LifecycleHook {
    pub const ALL: [LifecycleHook; 3] = [
        LifecycleHook::PackageCleanup,
        LifecycleHook::BeforePackageFunction,
        LifecycleHook::BeforeCreateDeploymentArtifacts,
    ];

    pub fn event_name(&self) -> &'static str {
        match self {
            LifecycleHook::PackageCleanup => "package:cleanup",
            LifecycleHook::BeforePackageFunction => "before:package:function:package",
            LifecycleHook::BeforeCreateDeploymentArtifacts => {
                "before:package:createDeploymentArtifacts"
            }
        }
    }

    pub fn steps(&self) -> &'static [HookStep] {
        match self {
            LifecycleHook::PackageCleanup => &[HookStep::Clean],
            LifecycleHook::BeforePackageFunction => &[HookStep::Clean, HookStep::Build],
            LifecycleHook::BeforeCreateDeploymentArtifacts => &[HookStep::Build],
        }
    }
}

impl fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

impl FromStr for LifecycleHook {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|hook| hook.event_name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|h| h.event_name()).collect();
                anyhow::anyhow!(
                    "Unknown lifecycle event '{}'. Expected one of: {}",
                    s,
                    known.join(", ")
                )
            })
    }
}
