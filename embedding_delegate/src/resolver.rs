//! Engine resolution
//!
//! A host may supply a ready engine (pre-warmed, cached, or retained from an
//! earlier container). Otherwise the injected factory builds one from the
//! host's launch arguments.

use crate::error::DelegateError;
use embedding_api::{EngineFactory, EngineHandle, Host, PlatformContext};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an attached engine came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineSource {
    /// The host handed it over
    HostSupplied,
    /// The factory built it for this attachment
    Constructed,
}

impl fmt::Display for EngineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineSource::HostSupplied => write!(f, "host_supplied"),
            EngineSource::Constructed => write!(f, "constructed"),
        }
    }
}

/// An engine together with its origin
pub struct ResolvedEngine {
    pub engine: EngineHandle,
    pub source: EngineSource,
}

/// Chooses between a host-supplied engine and a freshly built one
pub struct EngineResolver {
    factory: Box<dyn EngineFactory>,
}

impl EngineResolver {
    /// Creates a resolver that falls back to `factory`
    pub fn new(factory: Box<dyn EngineFactory>) -> Self {
        Self { factory }
    }

    /// Resolves the engine for one attachment
    ///
    /// The host is asked first; the factory is only consulted when the host
    /// declines.
    pub fn resolve(
        &self,
        host: &dyn Host,
        context: &PlatformContext,
    ) -> Result<ResolvedEngine, DelegateError> {
        if let Some(engine) = host.provide_engine(context) {
            return Ok(ResolvedEngine {
                engine,
                source: EngineSource::HostSupplied,
            });
        }

        let engine = self
            .factory
            .create_engine(context, &host.shell_args())
            .map_err(DelegateError::EngineUnavailable)?;

        Ok(ResolvedEngine {
            engine,
            source: EngineSource::Constructed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedding_api::{Engine, EngineError, NoEngineFactory, ShellArgs};
    use sim_engine::fault_injection::{EngineFault, FaultPlan};
    use sim_engine::test_utils::FakeHost;
    use sim_engine::{SharedFactory, SimEngine, SimEngineFactory};
    use std::rc::Rc;

    #[test]
    fn test_host_supplied_engine_wins() {
        let engine = SimEngine::shared();
        let host = FakeHost::with_engine(engine.handle());
        let factory = Rc::new(SimEngineFactory::new());
        let resolver = EngineResolver::new(Box::new(SharedFactory(factory.clone())));

        let resolved = resolver.resolve(&host, &host.context()).unwrap();

        assert_eq!(resolved.source, EngineSource::HostSupplied);
        assert_eq!(resolved.engine.id(), engine.id());
        assert!(factory.created().is_empty());
    }

    #[test]
    fn test_factory_receives_host_shell_args() {
        let host = FakeHost::new();
        host.set_shell_args(ShellArgs::from_args(["--trace-startup"]));
        let factory = Rc::new(SimEngineFactory::new());
        let resolver = EngineResolver::new(Box::new(SharedFactory(factory.clone())));

        let resolved = resolver.resolve(&host, &host.context()).unwrap();

        assert_eq!(resolved.source, EngineSource::Constructed);
        assert_eq!(factory.created().len(), 1);
        assert_eq!(
            factory.received_args(),
            vec![ShellArgs::from_args(["--trace-startup"])]
        );
    }

    #[test]
    fn test_factory_failure_is_engine_unavailable() {
        let host = FakeHost::new();
        let plan = FaultPlan::new().with_fault(EngineFault::FailCreation("no gpu".to_string()));
        let resolver = EngineResolver::new(Box::new(SimEngineFactory::with_faults(plan)));

        let result = resolver.resolve(&host, &host.context());

        assert!(matches!(
            result,
            Err(DelegateError::EngineUnavailable(EngineError::CreationFailed(_)))
        ));
    }

    #[test]
    fn test_no_factory_without_host_engine() {
        let host = FakeHost::new();
        let resolver = EngineResolver::new(Box::new(NoEngineFactory));
        assert!(resolver.resolve(&host, &host.context()).is_err());
    }
}
