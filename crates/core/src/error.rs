use crate::types::EntityKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("Invalid status '{status}' for {entity}. Must be one of: {allowed}")]
    InvalidTransition {
        entity: EntityKind,
        status: String,
        allowed: String,
    },

    #[error("Transition not offered for {entity}: '{from}' -> '{to}'")]
    TransitionNotOffered {
        entity: EntityKind,
        from: String,
        to: String,
    },

    #[error("Unknown filter dimension '{dimension}' for {entity}")]
    UnknownFilter {
        entity: EntityKind,
        dimension: String,
    },

    #[error("Status change for {entity} {id} was interrupted")]
    Interrupted { entity: EntityKind, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Fixture error: {0}")]
    Fixture(String),
}
