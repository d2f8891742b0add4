//! Status-change validation in two layers.
//!
//! 1. [`parse_status`] is what the store enforces: the requested value must
//!    be a member of the entity's status enumeration. Any member may follow
//!    any other.
//! 2. [`Transitions`] is the narrower table of moves the dashboard actually
//!    offers (e.g. a denied application gets no further buttons). Callers opt
//!    into it via [`check_offered`]; the store never applies it implicitly.
//!
//! The two layers disagree on purpose. An `Approved -> Pending Review` change
//! passes layer 1 and fails layer 2.

use crate::error::CoreError;
use crate::models::StatusRecord;
use crate::status::{ApplicationStatus, InvoiceStatus, Labeled, WorkOrderStatus};

/// Parse a raw status label for entity `E`.
///
/// Fails with [`CoreError::InvalidTransition`] when the label is not in the
/// enumeration.
pub fn parse_status<E: StatusRecord>(raw: &str) -> Result<E::Status, CoreError> {
    <E::Status as Labeled>::from_label(raw).map_err(|e| CoreError::InvalidTransition {
        entity: E::KIND,
        status: e.value,
        allowed: e.allowed,
    })
}

/// The next statuses the dashboard offers from a given status.
pub trait Transitions: Labeled {
    fn offered_next(self) -> &'static [Self];

    /// No further move is offered.
    fn is_terminal(self) -> bool {
        self.offered_next().is_empty()
    }
}

impl Transitions for WorkOrderStatus {
    fn offered_next(self) -> &'static [Self] {
        use WorkOrderStatus::*;
        match self {
            Pending => &[InProgress, Complete, OnHold],
            InProgress => &[Pending, Complete, OnHold],
            Complete => &[Pending, InProgress, OnHold],
            OnHold => &[Pending, InProgress, Complete],
        }
    }
}

impl Transitions for ApplicationStatus {
    fn offered_next(self) -> &'static [Self] {
        use ApplicationStatus::*;
        match self {
            PendingReview => &[InProgress, Approved, Denied],
            InProgress => &[Approved, Denied],
            Approved | Denied => &[],
        }
    }
}

impl Transitions for InvoiceStatus {
    fn offered_next(self) -> &'static [Self] {
        use InvoiceStatus::*;
        match self {
            Pending | Overdue => &[Paid],
            Paid => &[],
        }
    }
}

/// Reject a move the dashboard does not offer.
pub fn check_offered<E>(from: E::Status, to: E::Status) -> Result<(), CoreError>
where
    E: StatusRecord,
    E::Status: Transitions,
{
    if from.offered_next().contains(&to) {
        Ok(())
    } else {
        Err(CoreError::TransitionNotOffered {
            entity: E::KIND,
            from: from.label().to_string(),
            to: to.label().to_string(),
        })
    }
}
