//! Notification bus for the property-management dashboard.
//!
//! - [`NotificationBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`Notification`]: the toast envelope published after every status
//!   request, successful or not.

pub mod bus;

pub use bus::{Notification, NotificationBus, Severity};
