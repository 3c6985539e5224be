//! Render notifications
//!
//! Subscriptions are explicit: adding a listener returns a handle, and the
//! listener lives at most until that handle is passed back for removal. A
//! notifier may drop a listener earlier once it has fired.

use core_types::ObserverId;

/// Callback invoked when the engine renders its first frame
pub type FirstFrameListener = Box<dyn Fn()>;

/// Handle to a first-frame subscription
///
/// Not `Clone`: exactly one owner may remove the subscription.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct FrameObserverHandle {
    id: ObserverId,
}

impl FrameObserverHandle {
    /// Wraps an observer ID issued by a render notifier
    pub fn new(id: ObserverId) -> Self {
        Self { id }
    }

    /// Returns the observer ID
    pub fn id(&self) -> ObserverId {
        self.id
    }
}

/// Source of rendering notifications
pub trait RenderNotifier {
    /// Registers a listener for the first rendered frame
    fn add_first_frame_listener(&self, listener: FirstFrameListener) -> FrameObserverHandle;

    /// Removes a listener; the listener is dropped before this returns
    ///
    /// Returns false if the handle was not registered.
    fn remove_first_frame_listener(&self, handle: FrameObserverHandle) -> bool;
}
