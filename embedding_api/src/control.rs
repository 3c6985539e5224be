//! Host-control surface
//!
//! The engine's attachment point for exclusive control of host chrome and
//! input, and the receiver of platform events that only make sense while a
//! top-level container is present.

use crate::host::{ActivityHandle, LifecycleSource, PlatformContext};
use crate::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An intent payload delivered by the host platform
///
/// The embedding layer never interprets intents; they are forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Action name, if any
    pub action: Option<String>,
    /// Data URI, if any
    pub data: Option<String>,
    /// Extra key/value pairs (stable ordering)
    pub extras: BTreeMap<String, String>,
}

impl Intent {
    /// Creates an intent with the given action
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            data: None,
            extras: BTreeMap::new(),
        }
    }

    /// Sets the data URI
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Adds an extra
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// The engine's host-control attachment point
pub trait HostControlSurface {
    /// Grants the engine exclusive control of host chrome and input
    fn attach(
        &self,
        context: &PlatformContext,
        activity: Option<&ActivityHandle>,
        lifecycle: &LifecycleSource,
    ) -> Result<(), EngineError>;

    /// Revokes control granted by [`HostControlSurface::attach`]
    fn detach(&self);

    /// Delivers the outcome of a runtime permission request
    ///
    /// Returns true if a plugin handled the result.
    fn on_request_permissions_result(
        &self,
        request_code: i32,
        permissions: &[String],
        grant_results: &[i32],
    ) -> bool;

    /// Delivers a new intent sent to the already-running container
    fn on_new_intent(&self, intent: &Intent);

    /// Delivers the result of an activity launched for a result
    ///
    /// Returns true if a plugin handled the result.
    fn on_activity_result(&self, request_code: i32, result_code: i32, data: Option<&Intent>)
        -> bool;

    /// The user is about to leave the container
    fn on_user_leave_hint(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_builder() {
        let intent = Intent::new("action.VIEW")
            .with_data("app://deep/link")
            .with_extra("source", "notification");
        assert_eq!(intent.action.as_deref(), Some("action.VIEW"));
        assert_eq!(intent.data.as_deref(), Some("app://deep/link"));
        assert_eq!(intent.extras.get("source").map(String::as_str), Some("notification"));
    }

    #[test]
    fn test_default_intent_is_empty() {
        let intent = Intent::default();
        assert!(intent.action.is_none());
        assert!(intent.data.is_none());
        assert!(intent.extras.is_empty());
    }
}
