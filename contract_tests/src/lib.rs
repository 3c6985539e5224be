//! # Embedding Contract Tests
//!
//! This crate provides "golden" scenario tests for the embedding delegate to
//! ensure its observable behaviour does not drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Every guarantee the host relies on is a test
//! - **Observe, don't mock**: Scenarios run against the simulated engine and
//!   assert on the calls it recorded
//! - **Mechanism not policy**: Policies (stop behaviour, retention, host
//!   control) are exercised both ways
//!
//! ## Structure
//!
//! Each module covers one area of the contract:
//! - Lifecycle notifications and phase validation
//! - Entry point and initial route delivery
//! - Host-control attachment
//! - Event forwarding
//! - Engine retention across attachments
//! - Host variants
//! - Configuration schema

pub mod config_schema;
pub mod entrypoint;
pub mod forwarding;
pub mod host_control;
pub mod host_variants;
pub mod phases;
pub mod retention;

/// Common scenario helpers
pub mod test_helpers {
    use embedding_api::NoEngineFactory;
    use embedding_delegate::{EmbeddingDelegate, LOG_COMPONENT};
    use serde::Serialize;
    use services_logger::{Logger, MemoryLogSink};
    use sim_engine::test_utils::FakeHost;
    use sim_engine::{EngineCall, SimEngine};
    use std::rc::Rc;

    /// A delegate wired to a fake host that supplies a simulated engine
    pub struct Harness {
        pub engine: Rc<SimEngine>,
        pub host: Rc<FakeHost>,
        pub delegate: EmbeddingDelegate,
        pub logs: MemoryLogSink,
    }

    impl Harness {
        /// Drives the delegate from `Detached` to `Resumed`
        pub fn run_to_resumed(&mut self) {
            self.delegate.attach().expect("attach failed");
            self.delegate.on_create_view().expect("create view failed");
            self.delegate.start().expect("start failed");
            self.delegate.resume().expect("resume failed");
        }

        /// Drives the delegate from `Resumed` back to `Detached`
        pub fn run_to_detached(&mut self) {
            self.delegate.pause().expect("pause failed");
            self.delegate.stop().expect("stop failed");
            self.delegate.on_destroy_view().expect("destroy view failed");
            self.delegate.detach();
        }
    }

    /// Builds a harness around a fresh simulated engine
    pub fn harness() -> Harness {
        harness_with(SimEngine::new())
    }

    /// Builds a harness around `engine`
    pub fn harness_with(engine: SimEngine) -> Harness {
        let engine = Rc::new(engine);
        let host = Rc::new(FakeHost::with_engine(engine.handle()));
        let logs = MemoryLogSink::new();
        let delegate = EmbeddingDelegate::new(host.clone(), Box::new(NoEngineFactory))
            .with_logger(Logger::new(LOG_COMPONENT, Rc::new(logs.clone())));
        Harness {
            engine,
            host,
            delegate,
            logs,
        }
    }

    /// Verifies a value keeps its JSON spelling
    pub fn verify_json_spelling<T: Serialize>(value: &T, expected: &str) {
        let actual = serde_json::to_string(value).expect("Failed to serialize value");
        assert_eq!(
            actual, expected,
            "JSON spelling changed: expected {}, got {}",
            expected, actual
        );
    }

    /// Asserts the engine received exactly `expected` calls of a kind
    pub fn verify_call_count(engine: &SimEngine, call: &EngineCall, expected: usize) {
        assert_eq!(
            engine.count(call),
            expected,
            "Call count changed for {:?}: expected {}, got {}",
            call,
            expected,
            engine.count(call)
        );
    }
}
