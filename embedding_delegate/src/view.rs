//! The embedding view
//!
//! Creating the view is the point where the engine learns about its
//! surroundings: the render surface kind, whether it may draw through to
//! what is behind it, and the user's platform preferences.

use core_types::{EngineId, RenderMode, TransparencyMode};
use embedding_api::{Engine, Host, PlatformContext, SplashScreen};
use serde::{Deserialize, Serialize};

/// What the host container displays for the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingView {
    /// Engine the view renders
    pub engine_id: EngineId,
    pub render_mode: RenderMode,
    pub transparency_mode: TransparencyMode,
    /// Shown until the first frame arrives
    pub splash_screen: Option<SplashScreen>,
}

impl EmbeddingView {
    /// Describes the view a host wants for `engine`
    pub fn for_host(host: &dyn Host, engine: &dyn Engine) -> Self {
        Self {
            engine_id: engine.id(),
            render_mode: host.render_mode(),
            transparency_mode: host.transparency_mode(),
            splash_screen: host.provide_splash_screen(),
        }
    }

    /// True if something is shown before the first frame
    pub fn has_splash_screen(&self) -> bool {
        self.splash_screen.is_some()
    }

    /// True if the view draws through to what is behind it
    pub fn is_transparent(&self) -> bool {
        self.transparency_mode == TransparencyMode::Transparent
    }
}

/// Pushes platform preferences to the engine
///
/// Order matters to some engines: settings first, then locales, then the
/// accessibility flag.
pub fn push_platform_configuration(engine: &dyn Engine, context: &PlatformContext) {
    engine.settings_channel().send_settings(&context.user_settings);
    engine.localization_channel().send_locales(&context.locales);
    engine
        .accessibility_channel()
        .set_accessibility_enabled(context.accessibility_enabled);
}
