//! The host contract
//!
//! A host is the platform-owned container the engine is shown in. Two shapes
//! exist (a top-level container and an embeddable sub-container); both are
//! seen only through the [`Host`] trait.

use crate::channels::{Locale, UserSettings};
use crate::engine::EngineHandle;
use crate::entrypoint::{ShellArgs, DEFAULT_ENTRYPOINT};
use core_types::{ActivityId, ContextId, LifecycleSourceId, RenderMode, TransparencyMode};
use lifecycle::StopPolicy;
use serde::{Deserialize, Serialize};

/// Platform execution context
///
/// Carries the platform configuration that is pushed to the engine when a
/// view is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformContext {
    pub id: ContextId,
    /// Preferred locales, most preferred first
    pub locales: Vec<Locale>,
    /// User display preferences
    pub user_settings: UserSettings,
    /// Whether an accessibility service is active
    pub accessibility_enabled: bool,
}

impl PlatformContext {
    /// Creates a context with default preferences and an `en-US` locale
    pub fn new() -> Self {
        Self {
            id: ContextId::new(),
            locales: vec![Locale::new("en").with_country("US")],
            user_settings: UserSettings::default(),
            accessibility_enabled: false,
        }
    }

    /// Replaces the locale list
    pub fn with_locales(mut self, locales: Vec<Locale>) -> Self {
        self.locales = locales;
        self
    }

    /// Replaces the user settings
    pub fn with_user_settings(mut self, settings: UserSettings) -> Self {
        self.user_settings = settings;
        self
    }

    /// Sets the accessibility flag
    pub fn with_accessibility(mut self, enabled: bool) -> Self {
        self.accessibility_enabled = enabled;
        self
    }
}

impl Default for PlatformContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A top-level host container that can own system chrome
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityHandle {
    pub id: ActivityId,
    pub name: String,
}

impl ActivityHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ActivityId::new(),
            name: name.into(),
        }
    }
}

/// Source of host lifecycle notifications handed to the engine with control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LifecycleSource {
    pub id: LifecycleSourceId,
}

impl LifecycleSource {
    pub fn new() -> Self {
        Self {
            id: LifecycleSourceId::new(),
        }
    }
}

/// Content shown until the engine renders its first frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplashScreen {
    /// Resource drawn while waiting
    pub resource: String,
    /// Fade-out once the first frame arrives, in milliseconds
    pub transition_millis: u64,
}

impl SplashScreen {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            transition_millis: 500,
        }
    }
}

/// Platform integration owned by the host for one attachment
///
/// Controls system chrome on the engine's behalf.
pub trait PlatformPlugin {
    /// Re-applies the system UI overlay configuration
    fn update_system_ui_overlays(&self);

    /// Releases platform resources; no calls follow
    fn destroy(&self);
}

/// The host contract consumed by the embedding delegate
///
/// All methods take `&self`: a host is shared with the engine's first-frame
/// listener and keeps any mutable state behind interior mutability.
pub trait Host {
    /// Platform execution context
    fn context(&self) -> PlatformContext;

    /// The top-level container, if this host has one
    fn activity(&self) -> Option<ActivityHandle>;

    /// Lifecycle source handed to the engine with host control
    fn lifecycle_source(&self) -> LifecycleSource;

    /// Arguments used when the delegate has to build the engine itself
    fn shell_args(&self) -> ShellArgs;

    /// Entry point function to run
    fn entrypoint_function_name(&self) -> String {
        DEFAULT_ENTRYPOINT.to_string()
    }

    /// Program bundle path
    fn app_bundle_path(&self) -> String;

    /// Route the program should show first, if any
    fn initial_route(&self) -> Option<String>;

    fn render_mode(&self) -> RenderMode;

    fn transparency_mode(&self) -> TransparencyMode;

    /// Content shown until the first frame, if any
    fn provide_splash_screen(&self) -> Option<SplashScreen> {
        None
    }

    /// Supplies an engine; `None` asks the delegate to build one
    fn provide_engine(&self, context: &PlatformContext) -> Option<EngineHandle>;

    /// Supplies a platform plugin for the given engine, if the host wants one
    fn provide_platform_plugin(
        &self,
        _activity: Option<&ActivityHandle>,
        _engine: &EngineHandle,
    ) -> Option<Box<dyn PlatformPlugin>> {
        None
    }

    /// Gives the host a chance to install its own extensions
    fn configure_engine(&self, engine: &EngineHandle);

    /// Whether the engine should take control of host chrome and input
    fn should_attach_engine_to_activity(&self) -> bool;

    /// Whether the engine outlives this host
    fn retain_engine_after_host_destruction(&self) -> bool;

    /// What the engine is told when this host stops without pausing first
    fn stop_policy(&self) -> StopPolicy {
        StopPolicy::default()
    }

    /// The engine rendered its first frame
    fn on_first_frame_rendered(&self);
}
