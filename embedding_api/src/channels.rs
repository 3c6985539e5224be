//! Send-only notification channels into the engine
//!
//! Each channel is a narrow interface. The embedding layer never reads
//! anything back; message encoding belongs to the engine.

use core_types::PlatformBrightness;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application lifecycle notifications
pub trait LifecycleChannel {
    /// The container is visible and has focus
    fn app_is_resumed(&self);

    /// The container is visible but not focused
    fn app_is_inactive(&self);

    /// The container is no longer visible
    fn app_is_paused(&self);
}

/// Route navigation notifications
pub trait NavigationChannel {
    /// Sets the route the program should show first
    fn set_initial_route(&self, route: &str);

    /// Asks the program to pop its current route
    fn pop_route(&self);
}

/// System-level notifications
pub trait SystemChannel {
    fn send_memory_pressure_warning(&self);
}

/// User preference notifications
pub trait SettingsChannel {
    fn send_settings(&self, settings: &UserSettings);
}

/// Locale notifications
pub trait LocalizationChannel {
    /// Sends the user's preferred locales, most preferred first
    fn send_locales(&self, locales: &[Locale]);
}

/// Accessibility notifications
pub trait AccessibilityChannel {
    fn set_accessibility_enabled(&self, enabled: bool);
}

/// User preferences pushed to the engine when a view is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Font scale relative to the platform default
    pub text_scale_factor: f32,
    /// Whether times should be shown on a 24-hour clock
    pub use_24_hour_format: bool,
    /// Light or dark preference
    pub platform_brightness: PlatformBrightness,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            text_scale_factor: 1.0,
            use_24_hour_format: false,
            platform_brightness: PlatformBrightness::Light,
        }
    }
}

/// A user locale
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    pub language: String,
    pub country: Option<String>,
    pub script: Option<String>,
}

impl Locale {
    /// Creates a locale from a language code
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            country: None,
            script: None,
        }
    }

    /// Adds a country code
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Adds a script code
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{}", script)?;
        }
        if let Some(country) = &self.country {
            write!(f, "-{}", country)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_display() {
        assert_eq!(Locale::new("en").to_string(), "en");
        assert_eq!(Locale::new("en").with_country("US").to_string(), "en-US");
        assert_eq!(
            Locale::new("zh").with_script("Hans").with_country("CN").to_string(),
            "zh-Hans-CN"
        );
    }

    #[test]
    fn test_user_settings_default() {
        let settings = UserSettings::default();
        assert_eq!(settings.text_scale_factor, 1.0);
        assert!(!settings.use_24_hour_format);
        assert_eq!(settings.platform_brightness, PlatformBrightness::Light);
    }
}
