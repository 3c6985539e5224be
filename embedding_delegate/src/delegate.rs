//! The embedding delegate
//!
//! Translates host container callbacks into engine operations, one
//! attachment at a time.

use crate::error::DelegateError;
use crate::resolver::{EngineResolver, EngineSource, ResolvedEngine};
use crate::view::{push_platform_configuration, EmbeddingView};
use core_types::TrimMemoryLevel;
use embedding_api::{
    Engine, EngineFactory, EngineHandle, Entrypoint, FrameObserverHandle, Host, Intent,
    PlatformPlugin,
};
use lifecycle::{AppLifecycleState, DelegatePhase, LifecycleOp, PhaseMachine, Transition};
use services_logger::{LogLevel, Logger};
use std::rc::Rc;

/// Component name stamped on delegate log entries
pub const LOG_COMPONENT: &str = "embedding_delegate";

/// Bridges one host container to one engine
///
/// The delegate owns the attachment: it resolves the engine, subscribes to
/// its first frame, hands it host control when asked, runs the entry point
/// once, and translates lifecycle callbacks into engine notifications.
///
/// Lifecycle operations are validated against the current phase before any
/// side effect runs. Forwarding operations are silent no-ops while detached.
///
/// Call [`EmbeddingDelegate::detach`] before dropping an attached delegate.
/// Dropping does not release host control or the first-frame listener, and
/// that listener keeps the host alive.
pub struct EmbeddingDelegate {
    host: Rc<dyn Host>,
    resolver: EngineResolver,
    machine: PhaseMachine,
    engine: Option<EngineHandle>,
    engine_source: Option<EngineSource>,
    view: Option<EmbeddingView>,
    platform_plugin: Option<Box<dyn PlatformPlugin>>,
    first_frame_observer: Option<FrameObserverHandle>,
    has_entered_start: bool,
    initial_route_delivered: bool,
    is_controlling_host_chrome: bool,
    logger: Logger,
}

impl EmbeddingDelegate {
    /// Creates a detached delegate for `host`
    ///
    /// `factory` builds the engine whenever the host declines to supply one.
    pub fn new(host: Rc<dyn Host>, factory: Box<dyn EngineFactory>) -> Self {
        let machine = PhaseMachine::new(host.stop_policy());
        Self {
            host,
            resolver: EngineResolver::new(factory),
            machine,
            engine: None,
            engine_source: None,
            view: None,
            platform_plugin: None,
            first_frame_observer: None,
            has_entered_start: false,
            initial_route_delivered: false,
            is_controlling_host_chrome: false,
            logger: Logger::null(LOG_COMPONENT),
        }
    }

    /// Sends delegate log entries to `logger` instead of discarding them
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Current attachment phase
    pub fn phase(&self) -> DelegatePhase {
        self.machine.phase()
    }

    /// True in every phase except `Detached`
    pub fn is_attached(&self) -> bool {
        self.machine.phase().is_attached()
    }

    /// The attached engine, if any
    pub fn engine(&self) -> Option<&EngineHandle> {
        self.engine.as_ref()
    }

    /// Where the attached engine came from
    pub fn engine_source(&self) -> Option<EngineSource> {
        self.engine_source
    }

    /// The current view, between `on_create_view` and `on_destroy_view`
    pub fn view(&self) -> Option<&EmbeddingView> {
        self.view.as_ref()
    }

    /// True once the entry point has run (or was found running) this attachment
    pub fn has_entered_start(&self) -> bool {
        self.has_entered_start
    }

    /// True while the engine holds host control
    pub fn is_controlling_host_chrome(&self) -> bool {
        self.is_controlling_host_chrome
    }

    /// Attaches to an engine
    ///
    /// Resolves the engine, subscribes the host to its first frame, lets the
    /// host configure it, and hands it host control if the host asks for
    /// that. A host-control failure is logged and does not abort the attach.
    pub fn attach(&mut self) -> Result<(), DelegateError> {
        let transition = self.machine.plan(LifecycleOp::Attach)?;
        let context = self.host.context();

        let ResolvedEngine { engine, source } =
            match self.resolver.resolve(&*self.host, &context) {
                Ok(resolved) => resolved,
                Err(error) => {
                    self.logger.log(
                        self.logger
                            .entry(LogLevel::Error, "No engine available")
                            .with_field("error", &error),
                    );
                    return Err(error);
                }
            };

        let host = Rc::clone(&self.host);
        let observer = engine
            .renderer()
            .add_first_frame_listener(Box::new(move || host.on_first_frame_rendered()));

        self.host.configure_engine(&engine);

        let activity = self.host.activity();
        self.platform_plugin = self.host.provide_platform_plugin(activity.as_ref(), &engine);

        self.is_controlling_host_chrome = false;
        if self.host.should_attach_engine_to_activity() {
            let lifecycle = self.host.lifecycle_source();
            match engine
                .host_control()
                .attach(&context, activity.as_ref(), &lifecycle)
            {
                Ok(()) => self.is_controlling_host_chrome = true,
                Err(error) => self.logger.log(
                    self.logger
                        .entry(LogLevel::Warn, "Host control attach failed")
                        .with_field("engine", engine.id())
                        .with_field("error", &error),
                ),
            }
        }

        self.logger.log(
            self.logger
                .entry(LogLevel::Info, "Attached")
                .with_field("engine", engine.id())
                .with_field("source", source)
                .with_field("host_control", self.is_controlling_host_chrome),
        );

        self.first_frame_observer = Some(observer);
        self.engine = Some(engine);
        self.engine_source = Some(source);
        self.has_entered_start = false;
        self.initial_route_delivered = false;
        self.machine.commit(&transition)?;
        Ok(())
    }

    /// Creates the view and pushes platform preferences to the engine
    pub fn on_create_view(&mut self) -> Result<EmbeddingView, DelegateError> {
        let transition = self.machine.plan(LifecycleOp::CreateView)?;
        let engine = self.require_engine()?;

        let view = EmbeddingView::for_host(&*self.host, &*engine);
        push_platform_configuration(&*engine, &self.host.context());

        self.machine.commit(&transition)?;
        self.log_transition(&transition);
        self.view = Some(view.clone());
        Ok(view)
    }

    /// Makes the view visible
    ///
    /// The first start of an attachment delivers the initial route and then
    /// runs the entry point, unless the engine is already executing. Later
    /// starts only move the phase.
    ///
    /// If the entry point fails the phase is still `Started`; the error is
    /// returned and the next start after a stop tries again.
    pub fn start(&mut self) -> Result<(), DelegateError> {
        let transition = self.machine.plan(LifecycleOp::Start)?;
        let engine = self.require_engine()?;
        self.machine.commit(&transition)?;

        if transition.is_reentry() {
            self.logger.debug("Start while already started");
            return Ok(());
        }
        self.log_transition(&transition);
        self.run_entrypoint(&*engine)
    }

    /// The view gained focus
    pub fn resume(&mut self) -> Result<(), DelegateError> {
        self.notify_lifecycle(LifecycleOp::Resume)
    }

    /// Resume finished; the platform plugin re-applies system overlays
    pub fn on_post_resume(&mut self) -> Result<(), DelegateError> {
        let transition = self.machine.plan(LifecycleOp::PostResume)?;
        self.require_engine()?;
        self.machine.commit(&transition)?;

        if let Some(plugin) = &self.platform_plugin {
            plugin.update_system_ui_overlays();
        }
        Ok(())
    }

    /// The view lost focus but is still visible
    pub fn pause(&mut self) -> Result<(), DelegateError> {
        self.notify_lifecycle(LifecycleOp::Pause)
    }

    /// The view is no longer visible
    pub fn stop(&mut self) -> Result<(), DelegateError> {
        self.notify_lifecycle(LifecycleOp::Stop)
    }

    /// The view was torn down; the engine stays attached
    pub fn on_destroy_view(&mut self) -> Result<(), DelegateError> {
        let transition = self.machine.plan(LifecycleOp::DestroyView)?;
        self.machine.commit(&transition)?;
        self.view = None;
        self.log_transition(&transition);
        Ok(())
    }

    /// Releases the engine
    ///
    /// Never fails. Host control is released if it was taken, the first-frame
    /// subscription is removed and the platform plugin destroyed. If the host
    /// retains its engine, the handle is returned for a later attachment;
    /// otherwise the delegate drops its reference.
    pub fn detach(&mut self) -> Option<EngineHandle> {
        if !self.is_attached() {
            self.logger.debug("Detach while detached");
            return None;
        }
        let previous = self.machine.reset();

        let engine = self.engine.take();
        if let Some(engine) = &engine {
            if self.is_controlling_host_chrome {
                engine.host_control().detach();
            }
            if let Some(observer) = self.first_frame_observer.take() {
                engine.renderer().remove_first_frame_listener(observer);
            }
        }
        self.first_frame_observer = None;
        self.is_controlling_host_chrome = false;

        if let Some(plugin) = self.platform_plugin.take() {
            plugin.destroy();
        }

        self.view = None;
        self.engine_source = None;
        self.has_entered_start = false;
        self.initial_route_delivered = false;

        let retain = self.host.retain_engine_after_host_destruction();
        self.logger.log(
            self.logger
                .entry(LogLevel::Info, "Detached")
                .with_field("from", previous)
                .with_field("retained", retain),
        );

        if retain {
            engine
        } else {
            None
        }
    }

    /// Back navigation
    pub fn on_back_pressed(&self) {
        if let Some(engine) = self.forwarding_engine("back_pressed") {
            engine.navigation_channel().pop_route();
        }
    }

    /// Hands a permission request result to the host-control surface
    pub fn on_request_permissions_result(
        &self,
        request_code: i32,
        permissions: &[String],
        grant_results: &[i32],
    ) {
        if let Some(engine) = self.forwarding_engine("request_permissions_result") {
            engine.host_control().on_request_permissions_result(
                request_code,
                permissions,
                grant_results,
            );
        }
    }

    /// Hands a new intent to the host-control surface
    pub fn on_new_intent(&self, intent: &Intent) {
        if let Some(engine) = self.forwarding_engine("new_intent") {
            engine.host_control().on_new_intent(intent);
        }
    }

    /// Hands a finished activity's result to the host-control surface
    pub fn on_activity_result(&self, request_code: i32, result_code: i32, data: Option<&Intent>) {
        if let Some(engine) = self.forwarding_engine("activity_result") {
            engine
                .host_control()
                .on_activity_result(request_code, result_code, data);
        }
    }

    /// Tells the host-control surface the user is leaving the container
    pub fn on_user_leave_hint(&self) {
        if let Some(engine) = self.forwarding_engine("user_leave_hint") {
            engine.host_control().on_user_leave_hint();
        }
    }

    /// Forwards memory pressure; only the running-low levels reach the engine
    pub fn on_trim_memory(&self, level: TrimMemoryLevel) {
        if !level.is_memory_pressure() {
            return;
        }
        if let Some(engine) = self.forwarding_engine("trim_memory") {
            engine.system_channel().send_memory_pressure_warning();
        }
    }

    /// Platform-wide low memory; always forwarded as memory pressure
    pub fn on_low_memory(&self) {
        if let Some(engine) = self.forwarding_engine("low_memory") {
            engine.system_channel().send_memory_pressure_warning();
        }
    }

    fn require_engine(&self) -> Result<EngineHandle, DelegateError> {
        self.engine.clone().ok_or(DelegateError::NotAttached)
    }

    fn forwarding_engine(&self, event: &str) -> Option<&EngineHandle> {
        let engine = self.engine.as_ref().filter(|_| self.is_attached());
        if engine.is_none() {
            self.logger.log(
                self.logger
                    .entry(LogLevel::Debug, "Event dropped while detached")
                    .with_field("event", event),
            );
        }
        engine
    }

    fn notify_lifecycle(&mut self, op: LifecycleOp) -> Result<(), DelegateError> {
        let transition = self.machine.plan(op)?;
        let engine = self.require_engine()?;
        self.machine.commit(&transition)?;

        let channel = engine.lifecycle_channel();
        for state in &transition.notifications {
            match state {
                AppLifecycleState::Resumed => channel.app_is_resumed(),
                AppLifecycleState::Inactive => channel.app_is_inactive(),
                AppLifecycleState::Paused => channel.app_is_paused(),
            }
        }
        self.log_transition(&transition);
        Ok(())
    }

    fn run_entrypoint(&mut self, engine: &dyn Engine) -> Result<(), DelegateError> {
        if self.has_entered_start {
            return Ok(());
        }
        if engine.executor().is_executing() {
            self.logger.debug("Engine already executing; entry point skipped");
            self.has_entered_start = true;
            return Ok(());
        }

        if !self.initial_route_delivered {
            if let Some(route) = self.host.initial_route() {
                engine.navigation_channel().set_initial_route(&route);
            }
            self.initial_route_delivered = true;
        }

        let entrypoint = Entrypoint::new(
            self.host.app_bundle_path(),
            self.host.entrypoint_function_name(),
        );
        match engine.executor().execute(&entrypoint) {
            Ok(()) => {
                self.has_entered_start = true;
                self.logger.log(
                    self.logger
                        .entry(LogLevel::Info, "Entry point started")
                        .with_field("entrypoint", &entrypoint),
                );
                Ok(())
            }
            Err(source) => {
                self.logger.log(
                    self.logger
                        .entry(LogLevel::Error, "Entry point failed")
                        .with_field("entrypoint", &entrypoint)
                        .with_field("error", &source),
                );
                Err(DelegateError::EntrypointFailed { entrypoint, source })
            }
        }
    }

    fn log_transition(&self, transition: &Transition) {
        self.logger.log(
            self.logger
                .entry(LogLevel::Info, "Lifecycle transition")
                .with_field("op", transition.op)
                .with_field("from", transition.from)
                .with_field("to", transition.to),
        );
    }
}
