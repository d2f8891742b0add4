//! Closed enumerations for every categorical record field.
//!
//! Each variant carries the exact label shown by the presentation layer
//! (`"In Progress"`, `"Late Fee"`, ...). Labels are what get serialized,
//! parsed and compared; the Rust variant names are never exposed.

use std::fmt;
use std::str::FromStr;

/// A string did not match any label of the target enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not one of: {allowed}")]
pub struct UnknownLabel {
    pub value: String,
    pub allowed: String,
}

/// Shared behaviour of the labelled enumerations below.
pub trait Labeled: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// Every variant in declaration order.
    fn all() -> &'static [Self];

    fn label(self) -> &'static str;

    /// Comma-separated list of every label, for error messages.
    fn labels() -> String {
        Self::all()
            .iter()
            .map(|v| v.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Exact, case-sensitive label lookup.
    fn from_label(value: &str) -> Result<Self, UnknownLabel> {
        Self::all()
            .iter()
            .copied()
            .find(|v| v.label() == value)
            .ok_or_else(|| UnknownLabel {
                value: value.to_string(),
                allowed: Self::labels(),
            })
    }
}

macro_rules! define_label_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Return the display label.
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl Labeled for $name {
            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn label(self) -> &'static str {
                $name::label(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as Labeled>::from_label(s)
            }
        }
    };
}

define_label_enum! {
    /// Property usage.
    PropertyType {
        Residential => "Residential",
        Commercial => "Commercial",
        Mixed => "Mixed",
    }
}

define_label_enum! {
    /// Property lifecycle status.
    PropertyStatus {
        Active => "Active",
        Inactive => "Inactive",
    }
}

define_label_enum! {
    /// Tenant lease status.
    TenantStatus {
        Active => "Active",
        Pending => "Pending",
        Past => "Past",
    }
}

define_label_enum! {
    /// Work order urgency.
    WorkOrderPriority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Emergency => "Emergency",
    }
}

define_label_enum! {
    /// Work order progress.
    WorkOrderStatus {
        Pending => "Pending",
        InProgress => "In Progress",
        Complete => "Complete",
        OnHold => "On Hold",
    }
}

define_label_enum! {
    /// Trade a work order is routed to.
    WorkOrderCategory {
        Plumbing => "Plumbing",
        Electrical => "Electrical",
        Hvac => "HVAC",
        Appliance => "Appliance",
        General => "General",
        Exterior => "Exterior",
    }
}

define_label_enum! {
    /// Invoice payment status.
    InvoiceStatus {
        Paid => "Paid",
        Pending => "Pending",
        Overdue => "Overdue",
    }
}

define_label_enum! {
    /// What an invoice bills for.
    InvoiceType {
        Rent => "Rent",
        Utility => "Utility",
        Maintenance => "Maintenance",
        LateFee => "Late Fee",
    }
}

define_label_enum! {
    /// Rental application review status.
    ApplicationStatus {
        PendingReview => "Pending Review",
        InProgress => "In Progress",
        Approved => "Approved",
        Denied => "Denied",
    }
}

define_label_enum! {
    /// Calendar event kind.
    ScheduleType {
        Showing => "Showing",
        MoveIn => "Move-In",
        MoveOut => "Move-Out",
        Inspection => "Inspection",
        Maintenance => "Maintenance",
    }
}
