//! Presentation modes and platform signal levels shared by hosts and engines

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the engine's output is composed into the host's view hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Dedicated surface; fastest, cannot be layered under other views
    #[default]
    Surface,
    /// Texture composited with the rest of the view hierarchy
    Texture,
}

/// Whether the engine's view lets content behind it show through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransparencyMode {
    #[default]
    Opaque,
    Transparent,
}

/// Platform-wide light/dark preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformBrightness {
    #[default]
    Light,
    Dark,
}

/// Memory trim level reported by the host platform
///
/// Levels are ordered by severity and carry the platform's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrimMemoryLevel {
    /// Running, memory getting tight
    RunningModerate,
    /// Running, memory low
    RunningLow,
    /// Running, memory critically low
    RunningCritical,
    /// UI is no longer visible
    UiHidden,
    /// On the background LRU list
    Background,
    /// Middle of the background LRU list
    Moderate,
    /// Next in line to be killed
    Complete,
}

impl TrimMemoryLevel {
    /// Returns the platform code for this level
    pub fn code(&self) -> u32 {
        match self {
            TrimMemoryLevel::RunningModerate => 5,
            TrimMemoryLevel::RunningLow => 10,
            TrimMemoryLevel::RunningCritical => 15,
            TrimMemoryLevel::UiHidden => 20,
            TrimMemoryLevel::Background => 40,
            TrimMemoryLevel::Moderate => 60,
            TrimMemoryLevel::Complete => 80,
        }
    }

    /// Parses a platform code; unknown codes yield `None`
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            5 => Some(TrimMemoryLevel::RunningModerate),
            10 => Some(TrimMemoryLevel::RunningLow),
            15 => Some(TrimMemoryLevel::RunningCritical),
            20 => Some(TrimMemoryLevel::UiHidden),
            40 => Some(TrimMemoryLevel::Background),
            60 => Some(TrimMemoryLevel::Moderate),
            80 => Some(TrimMemoryLevel::Complete),
            _ => None,
        }
    }

    /// True when the engine should be told to shed memory
    ///
    /// Only the levels delivered while the container is still running count;
    /// background levels arrive when the engine can no longer react.
    /// `RunningCritical` is included: it is a more severe running level,
    /// not a different kind of signal.
    pub fn is_memory_pressure(&self) -> bool {
        matches!(
            self,
            TrimMemoryLevel::RunningLow | TrimMemoryLevel::RunningCritical
        )
    }
}

impl fmt::Display for TrimMemoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrimMemoryLevel::RunningModerate => "running_moderate",
            TrimMemoryLevel::RunningLow => "running_low",
            TrimMemoryLevel::RunningCritical => "running_critical",
            TrimMemoryLevel::UiHidden => "ui_hidden",
            TrimMemoryLevel::Background => "background",
            TrimMemoryLevel::Moderate => "moderate",
            TrimMemoryLevel::Complete => "complete",
        };
        write!(f, "{}({})", name, self.code())
    }
}
