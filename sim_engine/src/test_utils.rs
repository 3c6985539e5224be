//! Test doubles for the host side of the embedding contract
//!
//! [`FakeHost`] answers every host question from plain fields and counts the
//! callbacks it receives. Fields use interior mutability so a test can change
//! answers between attachments (for example, to hand back a retained engine).

use core_types::{EngineId, RenderMode, TransparencyMode};
use embedding_api::{
    ActivityHandle, EngineHandle, Host, LifecycleSource, PlatformContext, PlatformPlugin,
    ShellArgs, SplashScreen, DEFAULT_ENTRYPOINT,
};
use lifecycle::StopPolicy;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Platform plugin that counts calls
///
/// Clones share counters, so a test can keep one clone and hand the other
/// to a host.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlatformPlugin {
    overlay_updates: Rc<Cell<usize>>,
    destroyed: Rc<Cell<usize>>,
}

impl RecordingPlatformPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay_updates(&self) -> usize {
        self.overlay_updates.get()
    }

    pub fn destroy_count(&self) -> usize {
        self.destroyed.get()
    }
}

impl PlatformPlugin for RecordingPlatformPlugin {
    fn update_system_ui_overlays(&self) {
        self.overlay_updates.set(self.overlay_updates.get() + 1);
    }

    fn destroy(&self) {
        self.destroyed.set(self.destroyed.get() + 1);
    }
}

/// A host with sane defaults and observable callbacks
pub struct FakeHost {
    pub context: PlatformContext,
    pub activity: RefCell<Option<ActivityHandle>>,
    pub lifecycle: LifecycleSource,
    pub shell_args: RefCell<ShellArgs>,
    pub entrypoint_function_name: RefCell<String>,
    pub app_bundle_path: RefCell<String>,
    pub initial_route: RefCell<Option<String>>,
    pub render_mode: Cell<RenderMode>,
    pub transparency_mode: Cell<TransparencyMode>,
    pub splash_screen: RefCell<Option<SplashScreen>>,
    pub engine: RefCell<Option<EngineHandle>>,
    pub platform_plugin: RefCell<Option<RecordingPlatformPlugin>>,
    pub should_attach_to_activity: Cell<bool>,
    pub retain_engine: Cell<bool>,
    pub stop_policy: Cell<StopPolicy>,
    provide_engine_calls: Cell<usize>,
    configured_engines: RefCell<Vec<EngineId>>,
    first_frames: Cell<usize>,
}

impl FakeHost {
    /// Creates a host that supplies no engine and does not attach to its activity
    pub fn new() -> Self {
        Self {
            context: PlatformContext::new(),
            activity: RefCell::new(Some(ActivityHandle::new("fake_activity"))),
            lifecycle: LifecycleSource::new(),
            shell_args: RefCell::new(ShellArgs::new()),
            entrypoint_function_name: RefCell::new(DEFAULT_ENTRYPOINT.to_string()),
            app_bundle_path: RefCell::new("fake/path/".to_string()),
            initial_route: RefCell::new(None),
            render_mode: Cell::new(RenderMode::Surface),
            transparency_mode: Cell::new(TransparencyMode::Opaque),
            splash_screen: RefCell::new(None),
            engine: RefCell::new(None),
            platform_plugin: RefCell::new(None),
            should_attach_to_activity: Cell::new(false),
            retain_engine: Cell::new(false),
            stop_policy: Cell::new(StopPolicy::PausedOnly),
            provide_engine_calls: Cell::new(0),
            configured_engines: RefCell::new(Vec::new()),
            first_frames: Cell::new(0),
        }
    }

    /// Creates a host that supplies `engine`
    pub fn with_engine(engine: EngineHandle) -> Self {
        let host = Self::new();
        host.set_engine(Some(engine));
        host
    }

    pub fn set_engine(&self, engine: Option<EngineHandle>) {
        *self.engine.borrow_mut() = engine;
    }

    pub fn set_initial_route(&self, route: Option<&str>) {
        *self.initial_route.borrow_mut() = route.map(str::to_string);
    }

    pub fn set_entrypoint(&self, bundle_path: &str, function_name: &str) {
        *self.app_bundle_path.borrow_mut() = bundle_path.to_string();
        *self.entrypoint_function_name.borrow_mut() = function_name.to_string();
    }

    pub fn set_shell_args(&self, args: ShellArgs) {
        *self.shell_args.borrow_mut() = args;
    }

    pub fn set_should_attach_to_activity(&self, attach: bool) {
        self.should_attach_to_activity.set(attach);
    }

    pub fn set_retain_engine(&self, retain: bool) {
        self.retain_engine.set(retain);
    }

    pub fn set_stop_policy(&self, policy: StopPolicy) {
        self.stop_policy.set(policy);
    }

    pub fn set_activity(&self, activity: Option<ActivityHandle>) {
        *self.activity.borrow_mut() = activity;
    }

    /// Makes the host supply `plugin` from `provide_platform_plugin`
    pub fn set_platform_plugin(&self, plugin: Option<RecordingPlatformPlugin>) {
        *self.platform_plugin.borrow_mut() = plugin;
    }

    pub fn set_splash_screen(&self, splash: Option<SplashScreen>) {
        *self.splash_screen.borrow_mut() = splash;
    }

    /// Times `provide_engine` was called
    pub fn provide_engine_calls(&self) -> usize {
        self.provide_engine_calls.get()
    }

    /// Engines passed to `configure_engine`, in order
    pub fn configured_engines(&self) -> Vec<EngineId> {
        self.configured_engines.borrow().clone()
    }

    /// Times `on_first_frame_rendered` was called
    pub fn first_frames(&self) -> usize {
        self.first_frames.get()
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for FakeHost {
    fn context(&self) -> PlatformContext {
        self.context.clone()
    }

    fn activity(&self) -> Option<ActivityHandle> {
        self.activity.borrow().clone()
    }

    fn lifecycle_source(&self) -> LifecycleSource {
        self.lifecycle
    }

    fn shell_args(&self) -> ShellArgs {
        self.shell_args.borrow().clone()
    }

    fn entrypoint_function_name(&self) -> String {
        self.entrypoint_function_name.borrow().clone()
    }

    fn app_bundle_path(&self) -> String {
        self.app_bundle_path.borrow().clone()
    }

    fn initial_route(&self) -> Option<String> {
        self.initial_route.borrow().clone()
    }

    fn render_mode(&self) -> RenderMode {
        self.render_mode.get()
    }

    fn transparency_mode(&self) -> TransparencyMode {
        self.transparency_mode.get()
    }

    fn provide_splash_screen(&self) -> Option<SplashScreen> {
        self.splash_screen.borrow().clone()
    }

    fn provide_engine(&self, _context: &PlatformContext) -> Option<EngineHandle> {
        self.provide_engine_calls
            .set(self.provide_engine_calls.get() + 1);
        self.engine.borrow().clone()
    }

    fn provide_platform_plugin(
        &self,
        _activity: Option<&ActivityHandle>,
        _engine: &EngineHandle,
    ) -> Option<Box<dyn PlatformPlugin>> {
        self.platform_plugin
            .borrow()
            .clone()
            .map(|plugin| Box::new(plugin) as Box<dyn PlatformPlugin>)
    }

    fn configure_engine(&self, engine: &EngineHandle) {
        self.configured_engines.borrow_mut().push(engine.id());
    }

    fn should_attach_engine_to_activity(&self) -> bool {
        self.should_attach_to_activity.get()
    }

    fn retain_engine_after_host_destruction(&self) -> bool {
        self.retain_engine.get()
    }

    fn stop_policy(&self) -> StopPolicy {
        self.stop_policy.get()
    }

    fn on_first_frame_rendered(&self) {
        self.first_frames.set(self.first_frames.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimEngine;
    use embedding_api::Engine;

    #[test]
    fn test_fake_host_defaults() {
        let host = FakeHost::new();
        assert_eq!(host.entrypoint_function_name(), DEFAULT_ENTRYPOINT);
        assert_eq!(host.app_bundle_path(), "fake/path/");
        assert!(host.initial_route().is_none());
        assert!(!host.should_attach_engine_to_activity());
        assert!(!host.retain_engine_after_host_destruction());
        assert!(host.activity().is_some());
    }

    #[test]
    fn test_fake_host_supplies_engine_and_counts() {
        let engine = SimEngine::shared();
        let host = FakeHost::with_engine(engine.handle());
        let supplied = host.provide_engine(&host.context()).unwrap();
        assert_eq!(supplied.id(), engine.id());
        assert_eq!(host.provide_engine_calls(), 1);
    }

    #[test]
    fn test_recording_plugin_clones_share_counters() {
        let plugin = RecordingPlatformPlugin::new();
        let handed_out = plugin.clone();
        handed_out.update_system_ui_overlays();
        handed_out.destroy();
        assert_eq!(plugin.overlay_updates(), 1);
        assert_eq!(plugin.destroy_count(), 1);
    }
}
