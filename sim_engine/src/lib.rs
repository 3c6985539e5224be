//! # Simulated Engine
//!
//! This crate provides an in-process implementation of the engine contract.
//!
//! ## Purpose
//!
//! The simulated engine allows testing embedding behaviour without a native
//! engine:
//! - Runs under `cargo test`
//! - Deterministic (no threads, no real rendering)
//! - Inspectable (every call is recorded in order)
//! - Fault-injectable (see [`fault_injection`])
//!
//! This is not a mock with canned expectations. It is a full implementation
//! of the engine contract that records what it was told.

pub mod fault_injection;
pub mod test_utils;

use core_types::{ActivityId, EngineId, ObserverId};
use embedding_api::{
    AccessibilityChannel, ActivityHandle, Engine, EngineError, EngineFactory, EngineHandle,
    Entrypoint, EntrypointExecutor, FirstFrameListener, FrameObserverHandle, HostControlSurface,
    Intent, LifecycleChannel, LifecycleSource, Locale, LocalizationChannel, NavigationChannel,
    PlatformContext, RenderNotifier, SettingsChannel, ShellArgs, SystemChannel, UserSettings,
};
use fault_injection::{FaultInjector, FaultPlan};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A call received by the simulated engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    ExecuteEntrypoint(Entrypoint),
    HostControlAttach { activity: Option<ActivityId> },
    HostControlDetach,
    PermissionsResult {
        request_code: i32,
        permissions: Vec<String>,
        grant_results: Vec<i32>,
    },
    NewIntent(Intent),
    ActivityResult {
        request_code: i32,
        result_code: i32,
        data: Option<Intent>,
    },
    UserLeaveHint,
    AddFirstFrameListener(ObserverId),
    RemoveFirstFrameListener(ObserverId),
    AppIsResumed,
    AppIsInactive,
    AppIsPaused,
    SetInitialRoute(String),
    PopRoute,
    MemoryPressureWarning,
    Settings(UserSettings),
    Locales(Vec<Locale>),
    AccessibilityEnabled(bool),
}

impl EngineCall {
    /// True for the three lifecycle notifications
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            EngineCall::AppIsResumed | EngineCall::AppIsInactive | EngineCall::AppIsPaused
        )
    }
}

/// Simulated engine state
///
/// Implements every engine subsystem itself; the subsystem accessors all
/// return `self`.
pub struct SimEngine {
    id: EngineId,
    calls: RefCell<Vec<EngineCall>>,
    executing: Cell<bool>,
    host_control_attached: Cell<bool>,
    listeners: RefCell<Vec<(ObserverId, FirstFrameListener)>>,
    faults: RefCell<FaultInjector>,
}

impl SimEngine {
    /// Creates a new simulated engine
    pub fn new() -> Self {
        Self::with_faults(FaultPlan::new())
    }

    /// Creates a simulated engine with a fault plan
    pub fn with_faults(plan: FaultPlan) -> Self {
        Self {
            id: EngineId::new(),
            calls: RefCell::new(Vec::new()),
            executing: Cell::new(false),
            host_control_attached: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
            faults: RefCell::new(FaultInjector::new(plan)),
        }
    }

    /// Creates a shared simulated engine
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Returns the engine as a contract handle
    pub fn handle(self: &Rc<Self>) -> EngineHandle {
        self.clone()
    }

    /// Returns a copy of every call received, in order
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }

    /// Counts calls equal to `call`
    pub fn count(&self, call: &EngineCall) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    /// Counts calls matching `predicate`
    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&EngineCall) -> bool,
    {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    /// Lifecycle notifications received, in order
    pub fn lifecycle_calls(&self) -> Vec<EngineCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.is_lifecycle())
            .cloned()
            .collect()
    }

    /// Forgets recorded calls; state such as "executing" is kept
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// True while host control is held
    pub fn is_host_control_attached(&self) -> bool {
        self.host_control_attached.get()
    }

    /// Number of registered first-frame listeners
    pub fn first_frame_listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Simulates rendering the first frame
    ///
    /// Listeners are one-shot: they are invoked and then removed.
    pub fn render_first_frame(&self) -> usize {
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for (_, listener) in &listeners {
            listener();
        }
        listeners.len()
    }

    fn record(&self, call: EngineCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for SimEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for SimEngine {
    fn id(&self) -> EngineId {
        self.id
    }

    fn executor(&self) -> &dyn EntrypointExecutor {
        self
    }

    fn host_control(&self) -> &dyn HostControlSurface {
        self
    }

    fn renderer(&self) -> &dyn RenderNotifier {
        self
    }

    fn lifecycle_channel(&self) -> &dyn LifecycleChannel {
        self
    }

    fn navigation_channel(&self) -> &dyn NavigationChannel {
        self
    }

    fn system_channel(&self) -> &dyn SystemChannel {
        self
    }

    fn settings_channel(&self) -> &dyn SettingsChannel {
        self
    }

    fn localization_channel(&self) -> &dyn LocalizationChannel {
        self
    }

    fn accessibility_channel(&self) -> &dyn AccessibilityChannel {
        self
    }
}

impl EntrypointExecutor for SimEngine {
    fn is_executing(&self) -> bool {
        self.executing.get()
    }

    fn execute(&self, entrypoint: &Entrypoint) -> Result<(), EngineError> {
        self.record(EngineCall::ExecuteEntrypoint(entrypoint.clone()));
        if let Some(error) = self.faults.borrow_mut().take_execution_failure() {
            return Err(error);
        }
        self.executing.set(true);
        Ok(())
    }
}

impl HostControlSurface for SimEngine {
    fn attach(
        &self,
        _context: &PlatformContext,
        activity: Option<&ActivityHandle>,
        _lifecycle: &LifecycleSource,
    ) -> Result<(), EngineError> {
        self.record(EngineCall::HostControlAttach {
            activity: activity.map(|a| a.id),
        });
        if let Some(error) = self.faults.borrow_mut().take_host_control_rejection() {
            return Err(error);
        }
        self.host_control_attached.set(true);
        Ok(())
    }

    fn detach(&self) {
        self.record(EngineCall::HostControlDetach);
        self.host_control_attached.set(false);
    }

    fn on_request_permissions_result(
        &self,
        request_code: i32,
        permissions: &[String],
        grant_results: &[i32],
    ) -> bool {
        self.record(EngineCall::PermissionsResult {
            request_code,
            permissions: permissions.to_vec(),
            grant_results: grant_results.to_vec(),
        });
        self.host_control_attached.get()
    }

    fn on_new_intent(&self, intent: &Intent) {
        self.record(EngineCall::NewIntent(intent.clone()));
    }

    fn on_activity_result(
        &self,
        request_code: i32,
        result_code: i32,
        data: Option<&Intent>,
    ) -> bool {
        self.record(EngineCall::ActivityResult {
            request_code,
            result_code,
            data: data.cloned(),
        });
        self.host_control_attached.get()
    }

    fn on_user_leave_hint(&self) {
        self.record(EngineCall::UserLeaveHint);
    }
}

impl RenderNotifier for SimEngine {
    fn add_first_frame_listener(&self, listener: FirstFrameListener) -> FrameObserverHandle {
        let id = ObserverId::new();
        self.record(EngineCall::AddFirstFrameListener(id));
        self.listeners.borrow_mut().push((id, listener));
        FrameObserverHandle::new(id)
    }

    fn remove_first_frame_listener(&self, handle: FrameObserverHandle) -> bool {
        let id = handle.id();
        self.record(EngineCall::RemoveFirstFrameListener(id));
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            let position = listeners.iter().position(|(observer, _)| *observer == id);
            position.map(|index| listeners.remove(index))
        };
        removed.is_some()
    }
}

impl LifecycleChannel for SimEngine {
    fn app_is_resumed(&self) {
        self.record(EngineCall::AppIsResumed);
    }

    fn app_is_inactive(&self) {
        self.record(EngineCall::AppIsInactive);
    }

    fn app_is_paused(&self) {
        self.record(EngineCall::AppIsPaused);
    }
}

impl NavigationChannel for SimEngine {
    fn set_initial_route(&self, route: &str) {
        self.record(EngineCall::SetInitialRoute(route.to_string()));
    }

    fn pop_route(&self) {
        self.record(EngineCall::PopRoute);
    }
}

impl SystemChannel for SimEngine {
    fn send_memory_pressure_warning(&self) {
        self.record(EngineCall::MemoryPressureWarning);
    }
}

impl SettingsChannel for SimEngine {
    fn send_settings(&self, settings: &UserSettings) {
        self.record(EngineCall::Settings(settings.clone()));
    }
}

impl LocalizationChannel for SimEngine {
    fn send_locales(&self, locales: &[Locale]) {
        self.record(EngineCall::Locales(locales.to_vec()));
    }
}

impl AccessibilityChannel for SimEngine {
    fn set_accessibility_enabled(&self, enabled: bool) {
        self.record(EngineCall::AccessibilityEnabled(enabled));
    }
}

/// Factory that builds simulated engines
///
/// Remembers every engine it built and the arguments it was given.
#[derive(Default)]
pub struct SimEngineFactory {
    created: RefCell<Vec<Rc<SimEngine>>>,
    received_args: RefCell<Vec<ShellArgs>>,
    faults: RefCell<FaultInjector>,
}

impl SimEngineFactory {
    /// Creates a factory that always succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory with a fault plan (see [`fault_injection::EngineFault::FailCreation`])
    pub fn with_faults(plan: FaultPlan) -> Self {
        Self {
            faults: RefCell::new(FaultInjector::new(plan)),
            ..Self::default()
        }
    }

    /// Engines built so far
    pub fn created(&self) -> Vec<Rc<SimEngine>> {
        self.created.borrow().clone()
    }

    /// Arguments received by each creation attempt
    pub fn received_args(&self) -> Vec<ShellArgs> {
        self.received_args.borrow().clone()
    }

    /// The most recently built engine
    pub fn last_created(&self) -> Option<Rc<SimEngine>> {
        self.created.borrow().last().cloned()
    }
}

impl EngineFactory for SimEngineFactory {
    fn create_engine(
        &self,
        _context: &PlatformContext,
        shell_args: &ShellArgs,
    ) -> Result<EngineHandle, EngineError> {
        self.received_args.borrow_mut().push(shell_args.clone());
        if let Some(error) = self.faults.borrow_mut().take_creation_failure() {
            return Err(error);
        }
        let engine = SimEngine::shared();
        self.created.borrow_mut().push(engine.clone());
        Ok(engine)
    }
}

/// Shared wrapper so a factory can be inspected after being moved into a delegate
pub struct SharedFactory<F: ?Sized>(pub Rc<F>);

impl<F: ?Sized> Clone for SharedFactory<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<F: EngineFactory + ?Sized> EngineFactory for SharedFactory<F> {
    fn create_engine(
        &self,
        context: &PlatformContext,
        shell_args: &ShellArgs,
    ) -> Result<EngineHandle, EngineError> {
        self.0.create_engine(context, shell_args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fault_injection::EngineFault;

    #[test]
    fn test_calls_recorded_in_order() {
        let engine = SimEngine::new();
        engine.lifecycle_channel().app_is_resumed();
        engine.navigation_channel().pop_route();
        engine.system_channel().send_memory_pressure_warning();

        assert_eq!(
            engine.calls(),
            vec![
                EngineCall::AppIsResumed,
                EngineCall::PopRoute,
                EngineCall::MemoryPressureWarning
            ]
        );
        assert_eq!(engine.lifecycle_calls(), vec![EngineCall::AppIsResumed]);
    }

    #[test]
    fn test_execute_marks_executing() {
        let engine = SimEngine::new();
        assert!(!engine.executor().is_executing());
        engine.executor().execute(&Entrypoint::main("/bundle")).unwrap();
        assert!(engine.executor().is_executing());
    }

    #[test]
    fn test_execute_fault_leaves_engine_idle() {
        let engine = SimEngine::with_faults(
            FaultPlan::new().with_fault(EngineFault::FailNextExecution("bad".to_string())),
        );
        let result = engine.executor().execute(&Entrypoint::main("/bundle"));
        assert_eq!(result, Err(EngineError::ExecutionFailed("bad".to_string())));
        assert!(!engine.executor().is_executing());
    }

    #[test]
    fn test_host_control_attach_detach() {
        let engine = SimEngine::new();
        let activity = ActivityHandle::new("main");
        engine
            .host_control()
            .attach(&PlatformContext::new(), Some(&activity), &LifecycleSource::new())
            .unwrap();
        assert!(engine.is_host_control_attached());
        engine.host_control().detach();
        assert!(!engine.is_host_control_attached());
        assert_eq!(
            engine.count(&EngineCall::HostControlAttach {
                activity: Some(activity.id)
            }),
            1
        );
    }

    #[test]
    fn test_first_frame_listener_fires_once() {
        let engine = SimEngine::new();
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        engine
            .renderer()
            .add_first_frame_listener(Box::new(move || counter.set(counter.get() + 1)));

        assert_eq!(engine.render_first_frame(), 1);
        assert_eq!(engine.render_first_frame(), 0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_removed_listener_never_fires() {
        let engine = SimEngine::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let handle = engine
            .renderer()
            .add_first_frame_listener(Box::new(move || flag.set(true)));

        assert!(engine.renderer().remove_first_frame_listener(handle));
        assert_eq!(engine.first_frame_listener_count(), 0);
        engine.render_first_frame();
        assert!(!fired.get());
    }

    #[test]
    fn test_factory_records_args_and_engines() {
        let factory = SimEngineFactory::new();
        let args = ShellArgs::from_args(["--trace-startup"]);
        let engine = factory
            .create_engine(&PlatformContext::new(), &args)
            .unwrap();

        assert_eq!(factory.received_args(), vec![args]);
        assert_eq!(factory.created().len(), 1);
        assert_eq!(factory.last_created().map(|e| e.id()), Some(engine.id()));
    }

    #[test]
    fn test_factory_creation_fault() {
        let factory = SimEngineFactory::with_faults(
            FaultPlan::new().with_fault(EngineFault::FailCreation("no memory".to_string())),
        );
        let result = factory.create_engine(&PlatformContext::new(), &ShellArgs::new());
        assert!(matches!(result, Err(EngineError::CreationFailed(_))));
        assert!(factory.created().is_empty());
        assert_eq!(factory.received_args().len(), 1);
    }

    #[test]
    fn test_shared_factory_delegates() {
        let factory = Rc::new(SimEngineFactory::new());
        let shared = SharedFactory(factory.clone());
        shared
            .create_engine(&PlatformContext::new(), &ShellArgs::new())
            .unwrap();
        assert_eq!(factory.created().len(), 1);
    }
}
