//! Application event bus collaborator.

/// Events the client broadcasts to the rest of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The session is no longer valid and the user should be logged out.
    LogOut,
}

/// Application-wide event dispatcher.
///
/// The client emits [`AppEvent::LogOut`] when a request fails with 400 or 401
/// and the failing call was not itself a login attempt. It never subscribes.
pub trait EventBus: Send + Sync {
    fn emit(&self, event: AppEvent);
}
