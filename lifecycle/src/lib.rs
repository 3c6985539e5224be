//! # Lifecycle
//!
//! Attachment phases for an engine shown inside a host container.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Every host callback is a named operation
//! - **Plan, then commit**: Validity is decided before any side effect runs
//! - **Mechanism not policy**: The stop-from-resumed behaviour is a choice
//!   the host makes, not something inferred here
//! - **No async runtime required**: Works in sync contexts
//!
//! ## Core Concepts
//!
//! - `DelegatePhase`: Where the host container currently is
//! - `LifecycleOp`: A host callback that may move the phase
//! - `AppLifecycleState`: What the engine is told
//! - `PhaseMachine`: Validates operations and yields `Transition`s
//!
//! ## Phases
//!
//! ```text
//! Detached -> AttachedNoViews -> AttachedWithViews -> Started -> Resumed <-> Inactive -> Stopped
//! ```
//!
//! Any attached phase may return to `Detached`.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Where the host container is in its attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelegatePhase {
    /// No engine attached
    Detached,
    /// Engine attached, no views yet
    AttachedNoViews,
    /// Views created, not started
    AttachedWithViews,
    /// Visible, entry point launched
    Started,
    /// Visible and focused
    Resumed,
    /// Visible, not focused
    Inactive,
    /// No longer visible
    Stopped,
}

impl DelegatePhase {
    /// True for every phase except `Detached`
    pub fn is_attached(&self) -> bool {
        !matches!(self, DelegatePhase::Detached)
    }

    /// True while views exist
    pub fn has_views(&self) -> bool {
        !matches!(self, DelegatePhase::Detached | DelegatePhase::AttachedNoViews)
    }
}

impl fmt::Display for DelegatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelegatePhase::Detached => write!(f, "detached"),
            DelegatePhase::AttachedNoViews => write!(f, "attached (no views)"),
            DelegatePhase::AttachedWithViews => write!(f, "attached (views)"),
            DelegatePhase::Started => write!(f, "started"),
            DelegatePhase::Resumed => write!(f, "resumed"),
            DelegatePhase::Inactive => write!(f, "inactive"),
            DelegatePhase::Stopped => write!(f, "stopped"),
        }
    }
}

/// Host callbacks that drive the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleOp {
    Attach,
    CreateView,
    Start,
    Resume,
    PostResume,
    Pause,
    Stop,
    DestroyView,
    Detach,
}

impl fmt::Display for LifecycleOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleOp::Attach => "attach",
            LifecycleOp::CreateView => "create_view",
            LifecycleOp::Start => "start",
            LifecycleOp::Resume => "resume",
            LifecycleOp::PostResume => "post_resume",
            LifecycleOp::Pause => "pause",
            LifecycleOp::Stop => "stop",
            LifecycleOp::DestroyView => "destroy_view",
            LifecycleOp::Detach => "detach",
        };
        write!(f, "{}", name)
    }
}

/// Lifecycle state reported to the engine
///
/// The engine's "paused" is stricter than the host's: a host pause maps to
/// `Inactive`, and only a host stop maps to `Paused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppLifecycleState {
    Resumed,
    Inactive,
    Paused,
}

impl fmt::Display for AppLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppLifecycleState::Resumed => write!(f, "resumed"),
            AppLifecycleState::Inactive => write!(f, "inactive"),
            AppLifecycleState::Paused => write!(f, "paused"),
        }
    }
}

/// What to report when `stop` arrives straight from `Resumed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopPolicy {
    /// Report only `Paused`
    #[default]
    PausedOnly,
    /// Report `Inactive` then `Paused`, as if a pause had happened
    InactiveThenPaused,
}

/// A validated phase change and the engine notifications it implies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub op: LifecycleOp,
    pub from: DelegatePhase,
    pub to: DelegatePhase,
    /// Notifications to send, in order
    pub notifications: Vec<AppLifecycleState>,
}

impl Transition {
    /// True when the phase does not change
    pub fn is_reentry(&self) -> bool {
        self.from == self.to
    }
}

/// Validates host callbacks against the current phase
#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: DelegatePhase,
    stop_policy: StopPolicy,
}

impl PhaseMachine {
    /// Creates a machine in `Detached`
    pub fn new(stop_policy: StopPolicy) -> Self {
        Self {
            phase: DelegatePhase::Detached,
            stop_policy,
        }
    }

    /// Returns the current phase
    pub fn phase(&self) -> DelegatePhase {
        self.phase
    }

    pub fn stop_policy(&self) -> StopPolicy {
        self.stop_policy
    }

    /// Decides what `op` would do from the current phase
    ///
    /// Does not change the phase; pass the result to [`PhaseMachine::commit`].
    pub fn plan(&self, op: LifecycleOp) -> Result<Transition, LifecycleError> {
        use AppLifecycleState as App;
        use DelegatePhase as P;

        let (to, notifications) = match (op, self.phase) {
            (LifecycleOp::Attach, P::Detached) => (P::AttachedNoViews, Vec::new()),
            (LifecycleOp::CreateView, P::AttachedNoViews) => (P::AttachedWithViews, Vec::new()),
            (LifecycleOp::Start, P::AttachedWithViews | P::Started | P::Stopped) => {
                (P::Started, Vec::new())
            }
            (LifecycleOp::Resume, P::Started | P::Inactive) => (P::Resumed, alloc::vec![App::Resumed]),
            (LifecycleOp::PostResume, P::Resumed) => (P::Resumed, Vec::new()),
            (LifecycleOp::Pause, P::Resumed) => (P::Inactive, alloc::vec![App::Inactive]),
            (LifecycleOp::Stop, P::Inactive) => (P::Stopped, alloc::vec![App::Paused]),
            (LifecycleOp::Stop, P::Resumed) => match self.stop_policy {
                StopPolicy::PausedOnly => (P::Stopped, alloc::vec![App::Paused]),
                StopPolicy::InactiveThenPaused => {
                    (P::Stopped, alloc::vec![App::Inactive, App::Paused])
                }
            },
            (LifecycleOp::DestroyView, P::AttachedWithViews | P::Stopped) => {
                (P::AttachedNoViews, Vec::new())
            }
            (LifecycleOp::Detach, phase) if phase.is_attached() => (P::Detached, Vec::new()),
            (op, phase) => return Err(LifecycleError::InvalidTransition { op, phase }),
        };

        Ok(Transition {
            op,
            from: self.phase,
            to,
            notifications,
        })
    }

    /// Applies a planned transition
    ///
    /// A transition planned from a different phase is rejected.
    pub fn commit(&mut self, transition: &Transition) -> Result<DelegatePhase, LifecycleError> {
        if transition.from != self.phase {
            return Err(LifecycleError::StaleTransition {
                expected: transition.from,
                actual: self.phase,
            });
        }
        self.phase = transition.to;
        Ok(self.phase)
    }

    /// Plans and commits in one step
    pub fn apply(&mut self, op: LifecycleOp) -> Result<Transition, LifecycleError> {
        let transition = self.plan(op)?;
        self.commit(&transition)?;
        Ok(transition)
    }

    /// Forces the machine back to `Detached`
    ///
    /// Teardown must always succeed, whatever phase the host left us in.
    pub fn reset(&mut self) -> DelegatePhase {
        let previous = self.phase;
        self.phase = DelegatePhase::Detached;
        previous
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new(StopPolicy::default())
    }
}

/// Errors related to lifecycle operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The operation is not valid from the current phase
    InvalidTransition { op: LifecycleOp, phase: DelegatePhase },

    /// A planned transition was committed after the phase moved
    StaleTransition {
        expected: DelegatePhase,
        actual: DelegatePhase,
    },
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::InvalidTransition { op, phase } => {
                write!(f, "Cannot {} while {}", op, phase)
            }
            LifecycleError::StaleTransition { expected, actual } => write!(
                f,
                "Transition planned from {} but phase is {}",
                expected, actual
            ),
        }
    }
}

impl core::error::Error for LifecycleError {}
