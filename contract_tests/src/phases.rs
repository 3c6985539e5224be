//! Lifecycle contract tests
//!
//! Host callbacks map onto engine lifecycle notifications. The engine's
//! "paused" means invisible, so a host pause is reported as inactive and
//! only a host stop is reported as paused.

#[cfg(test)]
mod tests {
    use crate::test_helpers::*;
    use embedding_api::NoEngineFactory;
    use embedding_delegate::{DelegateError, EmbeddingDelegate};
    use lifecycle::{DelegatePhase, LifecycleError, LifecycleOp, StopPolicy};
    use services_logger::LogLevel;
    use sim_engine::test_utils::FakeHost;
    use sim_engine::{EngineCall, SimEngine};
    use std::rc::Rc;

    #[test]
    fn test_resume_pause_stop_notifies_in_order() {
        let mut h = harness();
        h.run_to_resumed();
        h.delegate.pause().unwrap();
        h.delegate.stop().unwrap();

        assert_eq!(
            h.engine.lifecycle_calls(),
            vec![
                EngineCall::AppIsResumed,
                EngineCall::AppIsInactive,
                EngineCall::AppIsPaused
            ]
        );
    }

    #[test]
    fn test_pause_resume_cycles() {
        let mut h = harness();
        h.run_to_resumed();
        h.delegate.pause().unwrap();
        h.delegate.resume().unwrap();
        h.delegate.pause().unwrap();

        verify_call_count(&h.engine, &EngineCall::AppIsResumed, 2);
        verify_call_count(&h.engine, &EngineCall::AppIsInactive, 2);
        verify_call_count(&h.engine, &EngineCall::AppIsPaused, 0);
        assert_eq!(h.delegate.phase(), DelegatePhase::Inactive);
    }

    fn stop_from_resumed(policy: StopPolicy) -> Vec<EngineCall> {
        let engine = SimEngine::shared();
        let host = Rc::new(FakeHost::with_engine(engine.handle()));
        host.set_stop_policy(policy);
        let mut delegate = EmbeddingDelegate::new(host, Box::new(NoEngineFactory));

        delegate.attach().unwrap();
        delegate.on_create_view().unwrap();
        delegate.start().unwrap();
        delegate.resume().unwrap();
        delegate.stop().unwrap();
        engine.lifecycle_calls()
    }

    #[test]
    fn test_stop_from_resumed_paused_only() {
        assert_eq!(
            stop_from_resumed(StopPolicy::PausedOnly),
            vec![EngineCall::AppIsResumed, EngineCall::AppIsPaused]
        );
    }

    #[test]
    fn test_stop_from_resumed_inactive_then_paused() {
        assert_eq!(
            stop_from_resumed(StopPolicy::InactiveThenPaused),
            vec![
                EngineCall::AppIsResumed,
                EngineCall::AppIsInactive,
                EngineCall::AppIsPaused
            ]
        );
    }

    #[test]
    fn test_out_of_order_callbacks_are_rejected() {
        let mut h = harness();
        h.delegate.attach().unwrap();
        h.engine.clear_calls();

        assert!(h.delegate.start().is_err());
        assert!(h.delegate.resume().is_err());
        assert!(h.delegate.pause().is_err());
        assert!(h.delegate.stop().is_err());
        assert!(h.delegate.on_post_resume().is_err());
        assert!(h.delegate.attach().is_err());

        assert!(h.engine.calls().is_empty());
        assert_eq!(h.delegate.phase(), DelegatePhase::AttachedNoViews);
    }

    #[test]
    fn test_rejection_names_operation_and_phase() {
        let mut h = harness();
        h.run_to_resumed();

        assert_eq!(
            h.delegate.on_destroy_view(),
            Err(DelegateError::InvalidTransition(
                LifecycleError::InvalidTransition {
                    op: LifecycleOp::DestroyView,
                    phase: DelegatePhase::Resumed,
                }
            ))
        );
    }

    #[test]
    fn test_repeated_start_is_quiet() {
        let mut h = harness();
        h.delegate.attach().unwrap();
        h.delegate.on_create_view().unwrap();
        h.delegate.start().unwrap();
        let calls = h.engine.calls().len();

        h.delegate.start().unwrap();

        assert_eq!(h.engine.calls().len(), calls);
        assert_eq!(h.delegate.phase(), DelegatePhase::Started);
    }

    #[test]
    fn test_restart_after_stop() {
        let mut h = harness();
        h.run_to_resumed();
        h.delegate.pause().unwrap();
        h.delegate.stop().unwrap();
        h.delegate.start().unwrap();
        h.delegate.resume().unwrap();

        verify_call_count(&h.engine, &EngineCall::AppIsResumed, 2);
        assert_eq!(
            h.engine
                .count_where(|c| matches!(c, EngineCall::ExecuteEntrypoint(_))),
            1
        );
    }

    #[test]
    fn test_detach_from_any_attached_phase() {
        let mut h = harness();
        h.run_to_resumed();

        h.delegate.detach();

        assert_eq!(h.delegate.phase(), DelegatePhase::Detached);
        assert!(h.delegate.view().is_none());
        assert!(!h.delegate.has_entered_start());
        assert!(h.delegate.engine().is_none());
    }

    #[test]
    fn test_full_cycle_twice() {
        let mut h = harness();
        h.run_to_resumed();
        h.run_to_detached();
        h.run_to_resumed();
        h.run_to_detached();

        verify_call_count(&h.engine, &EngineCall::AppIsResumed, 2);
        verify_call_count(&h.engine, &EngineCall::AppIsPaused, 2);
        assert_eq!(h.delegate.phase(), DelegatePhase::Detached);
    }

    #[test]
    fn test_every_transition_logged_at_info() {
        let mut h = harness();
        h.run_to_resumed();
        h.run_to_detached();

        let messages: Vec<String> = h
            .logs
            .entries_at(LogLevel::Info)
            .into_iter()
            .filter(|e| e.message == "Lifecycle transition")
            .filter_map(|e| e.field("op").map(str::to_string))
            .collect();
        assert_eq!(
            messages,
            vec![
                "create_view",
                "start",
                "resume",
                "pause",
                "stop",
                "destroy_view"
            ]
        );
        assert!(h.logs.contains("Attached"));
        assert!(h.logs.contains("Detached"));
    }
}
