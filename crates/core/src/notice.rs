//! Plain-language messages describing a completed status change.

use serde::Serialize;

use crate::error::CoreError;
use crate::models::{Application, Invoice, StatusRecord, WorkOrder};
use crate::status::ApplicationStatus;

/// A short headline with optional detail, ready for a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Notice for a rejected request.
    pub fn failure(error: &CoreError) -> Self {
        let title = match error {
            CoreError::NotFound { .. } => "Record not found",
            CoreError::InvalidTransition { .. } | CoreError::TransitionNotOffered { .. } => {
                "Status update rejected"
            }
            _ => "Request failed",
        };
        Self::new(title).with_description(error.to_string())
    }
}

/// Records that announce their own status changes.
pub trait Announce: StatusRecord {
    /// Describe the record's current status as a just-completed change.
    fn status_notice(&self) -> Notice;
}

impl Announce for Application {
    fn status_notice(&self) -> Notice {
        let description = match self.status {
            ApplicationStatus::Approved => "The applicant will be notified via email",
            ApplicationStatus::Denied => "A rejection email will be sent",
            _ => "Status has been updated",
        };
        Notice::new(format!(
            "Application {}!",
            self.status.label().to_lowercase()
        ))
        .with_description(description)
    }
}

impl Announce for WorkOrder {
    fn status_notice(&self) -> Notice {
        Notice::new(format!("Work order status updated to {}", self.status))
    }
}

impl Announce for Invoice {
    fn status_notice(&self) -> Notice {
        Notice::new(format!(
            "Invoice marked as {}!",
            self.status.label().to_lowercase()
        ))
    }
}
