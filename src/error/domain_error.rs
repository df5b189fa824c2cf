use thiserror::Error;

use crate::session::session_fsm::SessionFsmState;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("The session does not exist. SessionId: '{0}'.")]
    SessionDoesNotExist(String),
    #[error("Invalid state for submitting a Guess. ActualState: '{0:?}', ExpectedState: '{1:?}'.")]
    InvalidStateForGuess(SessionFsmState, SessionFsmState),
}
