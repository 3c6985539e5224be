//! Deterministic fault injection for testing
//!
//! Faults are one-shot: each configured fault fires on the first matching
//! operation and is then consumed.
//!
//! ## Example
//!
//! ```
//! use sim_engine::fault_injection::{EngineFault, FaultPlan};
//!
//! let plan = FaultPlan::new()
//!     .with_fault(EngineFault::FailNextExecution("boom".to_string()))
//!     .with_fault(EngineFault::RejectHostControl("no window".to_string()));
//! assert_eq!(plan.len(), 2);
//! ```

use embedding_api::EngineError;

/// A fault to inject into the simulated engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineFault {
    /// The next entry point execution fails
    FailNextExecution(String),

    /// The next host-control attach is rejected
    RejectHostControl(String),

    /// The next engine creation through the factory fails
    FailCreation(String),
}

/// A plan describing all faults to inject
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    faults: Vec<EngineFault>,
}

impl FaultPlan {
    /// Creates a new empty fault plan
    pub fn new() -> Self {
        Self { faults: Vec::new() }
    }

    /// Adds a fault
    pub fn with_fault(mut self, fault: EngineFault) -> Self {
        self.faults.push(fault);
        self
    }

    pub fn len(&self) -> usize {
        self.faults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Consumes faults from a plan as operations happen
#[derive(Debug, Clone, Default)]
pub struct FaultInjector {
    pending: Vec<EngineFault>,
    fired: usize,
}

impl FaultInjector {
    pub fn new(plan: FaultPlan) -> Self {
        Self {
            pending: plan.faults,
            fired: 0,
        }
    }

    /// Number of faults that have fired
    pub fn fired(&self) -> usize {
        self.fired
    }

    /// Number of faults still waiting
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Error for the current execution, if one is planned
    pub fn take_execution_failure(&mut self) -> Option<EngineError> {
        self.take(|fault| match fault {
            EngineFault::FailNextExecution(msg) => Some(EngineError::ExecutionFailed(msg.clone())),
            _ => None,
        })
    }

    /// Error for the current host-control attach, if one is planned
    pub fn take_host_control_rejection(&mut self) -> Option<EngineError> {
        self.take(|fault| match fault {
            EngineFault::RejectHostControl(msg) => {
                Some(EngineError::HostControlRejected(msg.clone()))
            }
            _ => None,
        })
    }

    /// Error for the current engine creation, if one is planned
    pub fn take_creation_failure(&mut self) -> Option<EngineError> {
        self.take(|fault| match fault {
            EngineFault::FailCreation(msg) => Some(EngineError::CreationFailed(msg.clone())),
            _ => None,
        })
    }

    fn take<F>(&mut self, matcher: F) -> Option<EngineError>
    where
        F: Fn(&EngineFault) -> Option<EngineError>,
    {
        let (index, error) = self
            .pending
            .iter()
            .enumerate()
            .find_map(|(index, fault)| matcher(fault).map(|error| (index, error)))?;
        self.pending.remove(index);
        self.fired += 1;
        Some(error)
    }
}
