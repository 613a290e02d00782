//! Repository interfaces for persistence collaborators.

pub mod session;

pub use session::SessionStore;

#[cfg(test)]
pub use session::MockSessionStore;
