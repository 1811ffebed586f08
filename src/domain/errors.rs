use thiserror::Error;

/// Errors from dispatching a balancing run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalanceError {
    #[error("Cannot balance {actual} participants: at least {minimum} required")]
    InvalidInputSize { minimum: usize, actual: usize },

    #[error("Participant {id} appears more than once")]
    DuplicateParticipant { id: String },
}

/// Errors from roster operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Participant name must not be empty")]
    EmptyName,

    #[error("Roster is full: at most {max} participants")]
    RosterFull { max: usize },

    #[error("A participant named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Selection is full: at most {max} participants can be selected")]
    SelectionFull { max: usize },

    #[error("Participant not found: {id}")]
    NotFound { id: String },
}
