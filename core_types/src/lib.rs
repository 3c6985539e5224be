//! # Core Types
//!
//! This crate defines the fundamental types shared by hosts, engines and the
//! embedding delegate.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Identities are typed and cannot be confused.
//! - **Type safety first**: Modes and signal levels are enums, not magic numbers.
//!
//! ## Key Types
//!
//! - [`EngineId`]: Unique identifier for an engine instance
//! - [`ObserverId`]: Identifier of a render-notification subscription
//! - [`ContextId`], [`ActivityId`], [`LifecycleSourceId`]: Host-side identities
//! - [`RenderMode`], [`TransparencyMode`]: How engine output is presented
//! - [`TrimMemoryLevel`]: Platform memory trim signal

pub mod ids;
pub mod modes;

pub use ids::{ActivityId, ContextId, EngineId, LifecycleSourceId, ObserverId};
pub use modes::{PlatformBrightness, RenderMode, TransparencyMode, TrimMemoryLevel};
