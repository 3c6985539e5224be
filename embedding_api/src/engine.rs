//! The engine contract and its bootstrap

use crate::channels::{
    AccessibilityChannel, LifecycleChannel, LocalizationChannel, NavigationChannel,
    SettingsChannel, SystemChannel,
};
use crate::control::HostControlSurface;
use crate::entrypoint::{EntrypointExecutor, ShellArgs};
use crate::host::PlatformContext;
use crate::render::RenderNotifier;
use crate::EngineError;
use core_types::EngineId;
use std::rc::Rc;

/// A long-lived rendering/execution engine
///
/// Multiple implementations are possible:
/// - A native engine behind an FFI boundary
/// - A simulated engine (for testing)
///
/// # Design Principles
///
/// **Send-only**: Every subsystem is a narrow interface the embedding layer
/// writes to. Nothing is read back except executor status.
///
/// **Shared, single-threaded**: Methods take `&self`; implementations keep
/// their mutable state behind `Cell`/`RefCell`. Engines are shared through
/// [`EngineHandle`] so a host may keep one alive across containers.
pub trait Engine {
    /// Returns this engine's identity
    fn id(&self) -> EngineId;

    /// Entry point executor
    fn executor(&self) -> &dyn EntrypointExecutor;

    /// Host-control attachment point
    fn host_control(&self) -> &dyn HostControlSurface;

    /// Render notification source
    fn renderer(&self) -> &dyn RenderNotifier;

    fn lifecycle_channel(&self) -> &dyn LifecycleChannel;

    fn navigation_channel(&self) -> &dyn NavigationChannel;

    fn system_channel(&self) -> &dyn SystemChannel;

    fn settings_channel(&self) -> &dyn SettingsChannel;

    fn localization_channel(&self) -> &dyn LocalizationChannel;

    fn accessibility_channel(&self) -> &dyn AccessibilityChannel;
}

/// Shared reference to an engine
pub type EngineHandle = Rc<dyn Engine>;

/// Builds engines when the host does not supply one
///
/// The bootstrap is injected where it is used instead of being reached
/// through process-wide state, so tests hand in a simulated factory.
pub trait EngineFactory {
    /// Creates a new engine with the given launch arguments
    fn create_engine(
        &self,
        context: &PlatformContext,
        shell_args: &ShellArgs,
    ) -> Result<EngineHandle, EngineError>;
}

/// Factory for hosts that always supply their own engine
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEngineFactory;

impl EngineFactory for NoEngineFactory {
    fn create_engine(
        &self,
        _context: &PlatformContext,
        _shell_args: &ShellArgs,
    ) -> Result<EngineHandle, EngineError> {
        Err(EngineError::CreationFailed(
            "no engine factory configured".to_string(),
        ))
    }
}
