//! # Embedding API
//!
//! This crate defines the contracts between a host container, a long-lived
//! engine, and the delegate that bridges them.
//!
//! ## Philosophy
//!
//! The delegate orchestrates; it never reimplements either side:
//! - The host supplies configuration and, optionally, an engine
//! - The engine exposes narrow, send-only subsystems
//! - Engine construction is an injected factory, not ambient state
//!
//! ## Design Goals
//!
//! 1. **Testability**: Every contract can be simulated in-process
//! 2. **Explicitness**: Subscriptions return handles; nothing is implicit
//! 3. **Type safety**: Modes, levels and identities are typed
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A rendering pipeline
//! - A channel wire format
//! - A platform binding layer

pub mod channels;
pub mod control;
pub mod engine;
pub mod entrypoint;
pub mod error;
pub mod host;
pub mod render;

pub use channels::{
    AccessibilityChannel, LifecycleChannel, Locale, LocalizationChannel, NavigationChannel,
    SettingsChannel, SystemChannel, UserSettings,
};
pub use control::{HostControlSurface, Intent};
pub use engine::{Engine, EngineFactory, EngineHandle, NoEngineFactory};
pub use entrypoint::{
    Entrypoint, EntrypointExecutor, ShellArgs, DEFAULT_BUNDLE_PATH, DEFAULT_ENTRYPOINT,
};
pub use error::EngineError;
pub use host::{
    ActivityHandle, Host, LifecycleSource, PlatformContext, PlatformPlugin, SplashScreen,
};
pub use render::{FirstFrameListener, FrameObserverHandle, RenderNotifier};
