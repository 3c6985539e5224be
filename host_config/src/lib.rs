//! # Host Configuration
//!
//! Typed configuration a host container hands to the embedding delegate.
//!
//! ## Philosophy
//!
//! - **Typed settings**: Every option has an explicit type, not a string map
//! - **Layered**: Baked-in defaults + explicit overrides
//! - **Deterministic**: Configuration is serializable and reproducible
//! - **Validated**: Bad combinations are rejected before a host is built
//!
//! ## Example
//!
//! ```
//! use host_config::{ConfigOverrides, HostConfig};
//!
//! let config = HostConfig::default().with_overrides(ConfigOverrides {
//!     initial_route: Some("/settings".to_string()),
//!     ..ConfigOverrides::default()
//! });
//!
//! assert_eq!(config.entrypoint, "main");
//! assert_eq!(config.initial_route.as_deref(), Some("/settings"));
//! assert!(config.validate().is_ok());
//! ```

pub mod persistence;

use core_types::{RenderMode, TransparencyMode};
use embedding_api::{Entrypoint, ShellArgs, DEFAULT_BUNDLE_PATH, DEFAULT_ENTRYPOINT};
use lifecycle::StopPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Entry point function name is empty")]
    EmptyEntrypoint,

    #[error("App bundle path is empty")]
    EmptyBundlePath,

    #[error("Initial route must start with '/': {0}")]
    InvalidInitialRoute(String),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

/// Everything a host declares about how its engine should run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Program bundle path
    pub app_bundle_path: String,
    /// Entry point function name
    pub entrypoint: String,
    /// Route shown first, if any
    pub initial_route: Option<String>,
    pub render_mode: RenderMode,
    pub transparency_mode: TransparencyMode,
    /// Arguments used when the delegate builds the engine
    pub shell_args: ShellArgs,
    /// Whether the engine takes control of host chrome and input
    pub attach_to_activity: bool,
    /// Whether the engine outlives the host
    pub retain_engine: bool,
    /// What to report when stopped straight from resumed
    pub stop_policy: StopPolicy,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            app_bundle_path: DEFAULT_BUNDLE_PATH.to_string(),
            entrypoint: DEFAULT_ENTRYPOINT.to_string(),
            initial_route: None,
            render_mode: RenderMode::default(),
            transparency_mode: TransparencyMode::default(),
            shell_args: ShellArgs::new(),
            attach_to_activity: true,
            retain_engine: false,
            stop_policy: StopPolicy::default(),
        }
    }
}

impl HostConfig {
    /// Sets the entry point
    pub fn with_entrypoint(
        mut self,
        app_bundle_path: impl Into<String>,
        function_name: impl Into<String>,
    ) -> Self {
        self.app_bundle_path = app_bundle_path.into();
        self.entrypoint = function_name.into();
        self
    }

    /// Sets the initial route
    pub fn with_initial_route(mut self, route: impl Into<String>) -> Self {
        self.initial_route = Some(route.into());
        self
    }

    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    pub fn with_transparency_mode(mut self, mode: TransparencyMode) -> Self {
        self.transparency_mode = mode;
        self
    }

    pub fn with_shell_args(mut self, args: ShellArgs) -> Self {
        self.shell_args = args;
        self
    }

    pub fn with_attach_to_activity(mut self, attach: bool) -> Self {
        self.attach_to_activity = attach;
        self
    }

    pub fn with_retain_engine(mut self, retain: bool) -> Self {
        self.retain_engine = retain;
        self
    }

    pub fn with_stop_policy(mut self, policy: StopPolicy) -> Self {
        self.stop_policy = policy;
        self
    }

    /// Applies overrides on top of this config
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        overrides.apply(&mut self);
        self
    }

    /// The entry point this config describes
    pub fn entrypoint(&self) -> Entrypoint {
        Entrypoint::new(self.app_bundle_path.clone(), self.entrypoint.clone())
    }

    /// Checks the config for values no host could run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entrypoint.trim().is_empty() {
            return Err(ConfigError::EmptyEntrypoint);
        }
        if self.app_bundle_path.trim().is_empty() {
            return Err(ConfigError::EmptyBundlePath);
        }
        if let Some(route) = &self.initial_route {
            if !route.starts_with('/') {
                return Err(ConfigError::InvalidInitialRoute(route.clone()));
            }
        }
        Ok(())
    }
}

/// Sparse overrides layered over a [`HostConfig`]
///
/// `None` keeps the underlying value. `initial_route` uses `Some` to replace;
/// use [`ConfigOverrides::clear_initial_route`] to remove it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub app_bundle_path: Option<String>,
    pub entrypoint: Option<String>,
    pub initial_route: Option<String>,
    pub clear_initial_route: bool,
    pub render_mode: Option<RenderMode>,
    pub transparency_mode: Option<TransparencyMode>,
    /// Appended to, not replacing, the base arguments
    pub extra_shell_args: Vec<String>,
    pub attach_to_activity: Option<bool>,
    pub retain_engine: Option<bool>,
    pub stop_policy: Option<StopPolicy>,
}

impl ConfigOverrides {
    /// True if applying this would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes the overridden values into `config`
    pub fn apply(self, config: &mut HostConfig) {
        if let Some(path) = self.app_bundle_path {
            config.app_bundle_path = path;
        }
        if let Some(entrypoint) = self.entrypoint {
            config.entrypoint = entrypoint;
        }
        if self.clear_initial_route {
            config.initial_route = None;
        }
        if let Some(route) = self.initial_route {
            config.initial_route = Some(route);
        }
        if let Some(mode) = self.render_mode {
            config.render_mode = mode;
        }
        if let Some(mode) = self.transparency_mode {
            config.transparency_mode = mode;
        }
        for arg in self.extra_shell_args {
            config.shell_args = std::mem::take(&mut config.shell_args).with_arg(arg);
        }
        if let Some(attach) = self.attach_to_activity {
            config.attach_to_activity = attach;
        }
        if let Some(retain) = self.retain_engine {
            config.retain_engine = retain;
        }
        if let Some(policy) = self.stop_policy {
            config.stop_policy = policy;
        }
    }
}
