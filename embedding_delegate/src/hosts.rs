//! Bundled host variants
//!
//! [`TopLevelHost`] owns a whole top-level container and may hand the engine
//! control over system chrome. [`EmbeddedHost`] lives inside some other
//! container's layout and only asks for control while it has a parent.
//!
//! Both answer the [`Host`] contract from a validated [`HostConfig`]; the
//! delegate never learns which one it is talking to.

use core_types::{RenderMode, TransparencyMode};
use embedding_api::{
    ActivityHandle, EngineHandle, Host, LifecycleSource, PlatformContext, PlatformPlugin,
    ShellArgs, SplashScreen,
};
use host_config::{ConfigError, HostConfig};
use lifecycle::StopPolicy;
use std::cell::{Cell, RefCell};

/// Host-side engine customization, run once per attachment
pub type EngineConfigurator = Box<dyn Fn(&EngineHandle)>;

/// Builds the platform plugin for an attachment
pub type PlatformPluginProvider =
    Box<dyn Fn(Option<&ActivityHandle>, &EngineHandle) -> Option<Box<dyn PlatformPlugin>>>;

/// Invoked when the engine reports its first frame
pub type FirstFrameCallback = Box<dyn Fn()>;

/// Callbacks shared by both host variants
#[derive(Default)]
struct HostHooks {
    configurator: Option<EngineConfigurator>,
    plugin_provider: Option<PlatformPluginProvider>,
    first_frame: Option<FirstFrameCallback>,
    first_frames: Cell<usize>,
}

impl HostHooks {
    fn configure(&self, engine: &EngineHandle) {
        if let Some(configurator) = &self.configurator {
            configurator(engine);
        }
    }

    fn provide_plugin(
        &self,
        activity: Option<&ActivityHandle>,
        engine: &EngineHandle,
    ) -> Option<Box<dyn PlatformPlugin>> {
        self.plugin_provider
            .as_ref()
            .and_then(|provider| provider(activity, engine))
    }

    fn first_frame_rendered(&self) {
        self.first_frames.set(self.first_frames.get() + 1);
        if let Some(callback) = &self.first_frame {
            callback();
        }
    }
}

/// A host that owns a top-level container
pub struct TopLevelHost {
    config: HostConfig,
    context: PlatformContext,
    activity: ActivityHandle,
    lifecycle: LifecycleSource,
    cached_engine: RefCell<Option<EngineHandle>>,
    splash_screen: Option<SplashScreen>,
    hooks: HostHooks,
}

impl TopLevelHost {
    /// Creates a host for the container `name`
    ///
    /// Fails if `config` does not validate.
    pub fn new(name: impl Into<String>, config: HostConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            context: PlatformContext::new(),
            activity: ActivityHandle::new(name),
            lifecycle: LifecycleSource::new(),
            cached_engine: RefCell::new(None),
            splash_screen: None,
            hooks: HostHooks::default(),
        })
    }

    /// Replaces the platform context pushed to the engine
    pub fn with_context(mut self, context: PlatformContext) -> Self {
        self.context = context;
        self
    }

    /// Supplies a pre-built engine instead of letting the delegate build one
    pub fn with_cached_engine(self, engine: EngineHandle) -> Self {
        self.cache_engine(engine);
        self
    }

    /// Shows `splash` until the first frame
    pub fn with_splash_screen(mut self, splash: SplashScreen) -> Self {
        self.splash_screen = Some(splash);
        self
    }

    /// Runs `configurator` on every attached engine
    pub fn with_configurator(mut self, configurator: impl Fn(&EngineHandle) + 'static) -> Self {
        self.hooks.configurator = Some(Box::new(configurator));
        self
    }

    /// Builds a platform plugin for each attachment
    pub fn with_platform_plugin_provider(
        mut self,
        provider: impl Fn(Option<&ActivityHandle>, &EngineHandle) -> Option<Box<dyn PlatformPlugin>>
            + 'static,
    ) -> Self {
        self.hooks.plugin_provider = Some(Box::new(provider));
        self
    }

    /// Calls `callback` when the engine renders its first frame
    pub fn on_first_frame(mut self, callback: impl Fn() + 'static) -> Self {
        self.hooks.first_frame = Some(Box::new(callback));
        self
    }

    /// The validated configuration this host answers from
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// The container this host owns
    pub fn activity_handle(&self) -> &ActivityHandle {
        &self.activity
    }

    /// Keeps `engine` for the next attachment
    pub fn cache_engine(&self, engine: EngineHandle) {
        *self.cached_engine.borrow_mut() = Some(engine);
    }

    /// Removes and returns the cached engine
    pub fn take_cached_engine(&self) -> Option<EngineHandle> {
        self.cached_engine.borrow_mut().take()
    }

    /// First frames reported so far
    pub fn first_frames(&self) -> usize {
        self.hooks.first_frames.get()
    }
}

impl Host for TopLevelHost {
    fn context(&self) -> PlatformContext {
        self.context.clone()
    }

    fn activity(&self) -> Option<ActivityHandle> {
        Some(self.activity.clone())
    }

    fn lifecycle_source(&self) -> LifecycleSource {
        self.lifecycle
    }

    fn shell_args(&self) -> ShellArgs {
        self.config.shell_args.clone()
    }

    fn entrypoint_function_name(&self) -> String {
        self.config.entrypoint.clone()
    }

    fn app_bundle_path(&self) -> String {
        self.config.app_bundle_path.clone()
    }

    fn initial_route(&self) -> Option<String> {
        self.config.initial_route.clone()
    }

    fn render_mode(&self) -> RenderMode {
        self.config.render_mode
    }

    fn transparency_mode(&self) -> TransparencyMode {
        self.config.transparency_mode
    }

    fn provide_splash_screen(&self) -> Option<SplashScreen> {
        self.splash_screen.clone()
    }

    fn provide_engine(&self, _context: &PlatformContext) -> Option<EngineHandle> {
        self.cached_engine.borrow().clone()
    }

    fn provide_platform_plugin(
        &self,
        activity: Option<&ActivityHandle>,
        engine: &EngineHandle,
    ) -> Option<Box<dyn PlatformPlugin>> {
        self.hooks.provide_plugin(activity, engine)
    }

    fn configure_engine(&self, engine: &EngineHandle) {
        self.hooks.configure(engine);
    }

    fn should_attach_engine_to_activity(&self) -> bool {
        self.config.attach_to_activity
    }

    fn retain_engine_after_host_destruction(&self) -> bool {
        self.config.retain_engine
    }

    fn stop_policy(&self) -> StopPolicy {
        self.config.stop_policy
    }

    fn on_first_frame_rendered(&self) {
        self.hooks.first_frame_rendered();
    }
}

/// A host embedded in another container's layout
///
/// The parent container may come and go; control over host chrome is only
/// requested while one is present.
pub struct EmbeddedHost {
    config: HostConfig,
    context: PlatformContext,
    parent: RefCell<Option<ActivityHandle>>,
    lifecycle: LifecycleSource,
    cached_engine: RefCell<Option<EngineHandle>>,
    splash_screen: Option<SplashScreen>,
    hooks: HostHooks,
}

impl EmbeddedHost {
    /// Creates a detached sub-container host
    pub fn new(config: HostConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            context: PlatformContext::new(),
            parent: RefCell::new(None),
            lifecycle: LifecycleSource::new(),
            cached_engine: RefCell::new(None),
            splash_screen: None,
            hooks: HostHooks::default(),
        })
    }

    /// Replaces the platform context pushed to the engine
    pub fn with_context(mut self, context: PlatformContext) -> Self {
        self.context = context;
        self
    }

    /// Supplies a pre-built engine instead of letting the delegate build one
    pub fn with_cached_engine(self, engine: EngineHandle) -> Self {
        self.cache_engine(engine);
        self
    }

    /// Shows `splash` until the first frame
    pub fn with_splash_screen(mut self, splash: SplashScreen) -> Self {
        self.splash_screen = Some(splash);
        self
    }

    /// Runs `configurator` on every attached engine
    pub fn with_configurator(mut self, configurator: impl Fn(&EngineHandle) + 'static) -> Self {
        self.hooks.configurator = Some(Box::new(configurator));
        self
    }

    /// Builds a platform plugin for each attachment
    pub fn with_platform_plugin_provider(
        mut self,
        provider: impl Fn(Option<&ActivityHandle>, &EngineHandle) -> Option<Box<dyn PlatformPlugin>>
            + 'static,
    ) -> Self {
        self.hooks.plugin_provider = Some(Box::new(provider));
        self
    }

    /// Calls `callback` when the engine renders its first frame
    pub fn on_first_frame(mut self, callback: impl Fn() + 'static) -> Self {
        self.hooks.first_frame = Some(Box::new(callback));
        self
    }

    /// The validated configuration this host answers from
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Places this host inside `parent`
    pub fn place_in(&self, parent: ActivityHandle) {
        *self.parent.borrow_mut() = Some(parent);
    }

    /// Removes this host from its parent, returning the old parent
    pub fn remove_from_parent(&self) -> Option<ActivityHandle> {
        self.parent.borrow_mut().take()
    }

    /// True while placed inside a parent container
    pub fn has_parent(&self) -> bool {
        self.parent.borrow().is_some()
    }

    /// Keeps `engine` for the next attachment
    pub fn cache_engine(&self, engine: EngineHandle) {
        *self.cached_engine.borrow_mut() = Some(engine);
    }

    /// Removes and returns the cached engine
    pub fn take_cached_engine(&self) -> Option<EngineHandle> {
        self.cached_engine.borrow_mut().take()
    }

    /// First frames reported so far
    pub fn first_frames(&self) -> usize {
        self.hooks.first_frames.get()
    }
}

impl Host for EmbeddedHost {
    fn context(&self) -> PlatformContext {
        self.context.clone()
    }

    fn activity(&self) -> Option<ActivityHandle> {
        self.parent.borrow().clone()
    }

    fn lifecycle_source(&self) -> LifecycleSource {
        self.lifecycle
    }

    fn shell_args(&self) -> ShellArgs {
        self.config.shell_args.clone()
    }

    fn entrypoint_function_name(&self) -> String {
        self.config.entrypoint.clone()
    }

    fn app_bundle_path(&self) -> String {
        self.config.app_bundle_path.clone()
    }

    fn initial_route(&self) -> Option<String> {
        self.config.initial_route.clone()
    }

    fn render_mode(&self) -> RenderMode {
        self.config.render_mode
    }

    fn transparency_mode(&self) -> TransparencyMode {
        self.config.transparency_mode
    }

    fn provide_splash_screen(&self) -> Option<SplashScreen> {
        self.splash_screen.clone()
    }

    fn provide_engine(&self, _context: &PlatformContext) -> Option<EngineHandle> {
        self.cached_engine.borrow().clone()
    }

    fn provide_platform_plugin(
        &self,
        activity: Option<&ActivityHandle>,
        engine: &EngineHandle,
    ) -> Option<Box<dyn PlatformPlugin>> {
        self.hooks.provide_plugin(activity, engine)
    }

    fn configure_engine(&self, engine: &EngineHandle) {
        self.hooks.configure(engine);
    }

    fn should_attach_engine_to_activity(&self) -> bool {
        self.config.attach_to_activity && self.has_parent()
    }

    fn retain_engine_after_host_destruction(&self) -> bool {
        self.config.retain_engine
    }

    fn stop_policy(&self) -> StopPolicy {
        self.config.stop_policy
    }

    fn on_first_frame_rendered(&self) {
        self.hooks.first_frame_rendered();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_engine::test_utils::RecordingPlatformPlugin;
    use sim_engine::SimEngine;
    use std::rc::Rc;

    #[test]
    fn test_top_level_host_answers_from_config() {
        let config = HostConfig::default()
            .with_entrypoint("bundle", "run")
            .with_initial_route("/home")
            .with_retain_engine(true)
            .with_stop_policy(StopPolicy::InactiveThenPaused);
        let host = TopLevelHost::new("main", config).unwrap();

        assert_eq!(host.app_bundle_path(), "bundle");
        assert_eq!(host.entrypoint_function_name(), "run");
        assert_eq!(host.initial_route().as_deref(), Some("/home"));
        assert!(host.retain_engine_after_host_destruction());
        assert!(host.should_attach_engine_to_activity());
        assert_eq!(host.stop_policy(), StopPolicy::InactiveThenPaused);
        assert_eq!(host.activity().map(|a| a.name), Some("main".to_string()));
    }

    #[test]
    fn test_top_level_host_rejects_invalid_config() {
        let config = HostConfig::default().with_entrypoint("bundle", "");
        assert_eq!(
            TopLevelHost::new("main", config).err(),
            Some(ConfigError::EmptyEntrypoint)
        );
    }

    #[test]
    fn test_cached_engine_is_supplied_until_taken() {
        let engine = SimEngine::shared();
        let host = TopLevelHost::new("main", HostConfig::default())
            .unwrap()
            .with_cached_engine(engine.handle());

        assert!(host.provide_engine(&host.context()).is_some());
        assert!(host.provide_engine(&host.context()).is_some());
        assert!(host.take_cached_engine().is_some());
        assert!(host.provide_engine(&host.context()).is_none());
    }

    #[test]
    fn test_hooks_run_configurator_plugin_and_first_frame() {
        let configured = Rc::new(Cell::new(0));
        let seen = configured.clone();
        let frames = Rc::new(Cell::new(0));
        let frames_seen = frames.clone();
        let plugin = RecordingPlatformPlugin::new();
        let handed_out = plugin.clone();

        let host = TopLevelHost::new("main", HostConfig::default())
            .unwrap()
            .with_configurator(move |_| seen.set(seen.get() + 1))
            .with_platform_plugin_provider(move |_, _| {
                Some(Box::new(handed_out.clone()) as Box<dyn PlatformPlugin>)
            })
            .on_first_frame(move || frames_seen.set(frames_seen.get() + 1));

        let engine: EngineHandle = SimEngine::shared().handle();
        host.configure_engine(&engine);
        let provided = host.provide_platform_plugin(host.activity().as_ref(), &engine);
        host.on_first_frame_rendered();

        assert_eq!(configured.get(), 1);
        assert!(provided.is_some());
        assert_eq!(frames.get(), 1);
        assert_eq!(host.first_frames(), 1);
    }

    #[test]
    fn test_embedded_host_needs_parent_for_control() {
        let host = EmbeddedHost::new(HostConfig::default()).unwrap();
        assert!(host.activity().is_none());
        assert!(!host.should_attach_engine_to_activity());

        host.place_in(ActivityHandle::new("shell"));
        assert!(host.should_attach_engine_to_activity());

        assert!(host.remove_from_parent().is_some());
        assert!(!host.should_attach_engine_to_activity());
    }

    #[test]
    fn test_embedded_host_respects_config_opt_out() {
        let host =
            EmbeddedHost::new(HostConfig::default().with_attach_to_activity(false)).unwrap();
        host.place_in(ActivityHandle::new("shell"));
        assert!(!host.should_attach_engine_to_activity());
    }
}
