//! Host variant contract tests
//!
//! Both bundled hosts drive the same delegate; only their answers differ.

#[cfg(test)]
mod tests {
    use embedding_api::{ActivityHandle, Engine, PlatformContext, PlatformPlugin, SplashScreen};
    use embedding_delegate::{EmbeddedHost, EmbeddingDelegate, EngineSource, TopLevelHost};
    use host_config::HostConfig;
    use lifecycle::StopPolicy;
    use sim_engine::test_utils::RecordingPlatformPlugin;
    use sim_engine::{EngineCall, SharedFactory, SimEngine, SimEngineFactory};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_top_level_host_full_cycle() {
        let engine_factory = Rc::new(SimEngineFactory::new());
        let config = HostConfig::default()
            .with_entrypoint("/my/bundle/path", "myEntrypoint")
            .with_initial_route("/my/route");
        let host = Rc::new(TopLevelHost::new("main", config).unwrap());
        let mut delegate = EmbeddingDelegate::new(
            host.clone(),
            Box::new(SharedFactory(engine_factory.clone())),
        );

        delegate.attach().unwrap();
        delegate.on_create_view().unwrap();
        delegate.start().unwrap();
        delegate.resume().unwrap();
        let engine = engine_factory.last_created().unwrap();
        engine.render_first_frame();
        delegate.pause().unwrap();
        delegate.stop().unwrap();
        delegate.on_destroy_view().unwrap();
        delegate.detach();

        assert_eq!(delegate.engine_source(), None);
        assert_eq!(host.first_frames(), 1);
        assert_eq!(
            engine.count(&EngineCall::SetInitialRoute("/my/route".to_string())),
            1
        );
        assert_eq!(
            engine.count(&EngineCall::HostControlAttach {
                activity: Some(host.activity_handle().id)
            }),
            1
        );
        assert_eq!(engine.count(&EngineCall::HostControlDetach), 1);
    }

    #[test]
    fn test_top_level_host_cached_engine_and_hooks() {
        let engine = SimEngine::shared();
        let configured = Rc::new(Cell::new(0));
        let seen = configured.clone();
        let plugin = RecordingPlatformPlugin::new();
        let handed_out = plugin.clone();
        let host = Rc::new(
            TopLevelHost::new("main", HostConfig::default().with_retain_engine(true))
                .unwrap()
                .with_cached_engine(engine.handle())
                .with_configurator(move |_| seen.set(seen.get() + 1))
                .with_platform_plugin_provider(move |activity, _| {
                    assert!(activity.is_some());
                    Some(Box::new(handed_out.clone()) as Box<dyn PlatformPlugin>)
                }),
        );
        let mut delegate =
            EmbeddingDelegate::new(host.clone(), Box::new(embedding_api::NoEngineFactory));

        delegate.attach().unwrap();
        delegate.on_create_view().unwrap();
        delegate.start().unwrap();
        delegate.resume().unwrap();
        delegate.on_post_resume().unwrap();
        let retained = delegate.detach();

        assert_eq!(configured.get(), 1);
        assert_eq!(plugin.overlay_updates(), 1);
        assert_eq!(plugin.destroy_count(), 1);
        assert_eq!(retained.map(|e| e.id()), Some(engine.id()));
    }

    #[test]
    fn test_top_level_host_stop_policy_from_config() {
        let engine = SimEngine::shared();
        let config = HostConfig::default().with_stop_policy(StopPolicy::InactiveThenPaused);
        let host = Rc::new(
            TopLevelHost::new("main", config)
                .unwrap()
                .with_cached_engine(engine.handle()),
        );
        let mut delegate = EmbeddingDelegate::new(host, Box::new(embedding_api::NoEngineFactory));

        delegate.attach().unwrap();
        delegate.on_create_view().unwrap();
        delegate.start().unwrap();
        delegate.resume().unwrap();
        delegate.stop().unwrap();

        assert_eq!(
            engine.lifecycle_calls(),
            vec![
                EngineCall::AppIsResumed,
                EngineCall::AppIsInactive,
                EngineCall::AppIsPaused
            ]
        );
    }

    #[test]
    fn test_embedded_host_without_parent_skips_host_control() {
        let engine = SimEngine::shared();
        let host = Rc::new(EmbeddedHost::new(HostConfig::default()).unwrap());
        host.cache_engine(engine.handle());
        let mut delegate =
            EmbeddingDelegate::new(host.clone(), Box::new(embedding_api::NoEngineFactory));

        delegate.attach().unwrap();
        delegate.detach();

        assert_eq!(
            engine.count_where(|c| matches!(
                c,
                EngineCall::HostControlAttach { .. } | EngineCall::HostControlDetach
            )),
            0
        );
    }

    #[test]
    fn test_embedded_host_in_parent_takes_host_control() {
        let engine = SimEngine::shared();
        let parent = ActivityHandle::new("shell");
        let host = Rc::new(
            EmbeddedHost::new(HostConfig::default())
                .unwrap()
                .with_cached_engine(engine.handle()),
        );
        host.place_in(parent.clone());
        let mut delegate =
            EmbeddingDelegate::new(host.clone(), Box::new(embedding_api::NoEngineFactory));

        delegate.attach().unwrap();
        assert!(delegate.is_controlling_host_chrome());
        delegate.detach();

        assert_eq!(
            engine.count(&EngineCall::HostControlAttach {
                activity: Some(parent.id)
            }),
            1
        );
        assert_eq!(engine.count(&EngineCall::HostControlDetach), 1);
    }

    #[test]
    fn test_embedded_host_view_carries_splash_and_context() {
        let engine = SimEngine::shared();
        let context = PlatformContext::new().with_accessibility(true);
        let host = Rc::new(
            EmbeddedHost::new(HostConfig::default())
                .unwrap()
                .with_context(context)
                .with_splash_screen(SplashScreen::new("launch_background"))
                .with_cached_engine(engine.handle()),
        );
        let mut delegate =
            EmbeddingDelegate::new(host.clone(), Box::new(embedding_api::NoEngineFactory));

        delegate.attach().unwrap();
        let view = delegate.on_create_view().unwrap();

        assert!(view.has_splash_screen());
        assert_eq!(engine.count(&EngineCall::AccessibilityEnabled(true)), 1);
        assert_eq!(delegate.engine_source(), Some(EngineSource::HostSupplied));
    }
}
