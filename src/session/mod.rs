pub mod actor;
pub mod actor_client;
pub mod session_fsm;

use rust_fsm::StateMachine;

use crate::catalog::CharacterCard;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::session::session_fsm::{SessionFsm, SessionFsmInput, SessionFsmState};

const CORRECT_FEEDBACK: &str = "Good job, you got it right!";
const WRONG_FEEDBACK: &str = "Oops, that was incorrect! Enter try again or refresh.";

/// One player's game: the answer key of the active round, the feedback line
/// and the two session counters. All of it dies with the session.
pub struct Session {
    id: String,
    fsm: StateMachine<SessionFsm>,
    answer_name: Option<String>,
    alias: Option<String>,
    feedback: Option<String>,
    rounds_generated: u64,
    correct_guesses: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GuessResult {
    Correct,
    Wrong,
}

/// Immutable view of a Session for the HTTP layer.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub id: String,
    pub state: SessionFsmState,
    pub alias: Option<String>,
    pub feedback: Option<String>,
    pub rounds_generated: u64,
    pub correct_guesses: u64,
}

impl Session {
    pub fn new(id: &str) -> Self {
        Session {
            id: id.to_string(),
            fsm: StateMachine::default(),
            answer_name: None,
            alias: None,
            feedback: None,
            rounds_generated: 0,
            correct_guesses: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &SessionFsmState {
        self.fsm.state()
    }

    /// Start loading a new round. The previous answer key and alias are gone
    /// from this point on, a guess can only race against the next round.
    pub fn begin_round(&mut self) -> Result<(), Error> {
        self.answer_name = None;
        self.alias = None;
        self.process_event(&SessionFsmInput::RequestRound)
    }

    pub fn round_ready(&mut self, card: CharacterCard) -> Result<(), Error> {
        self.process_event(&SessionFsmInput::RoundReady)?;
        self.answer_name = Some(card.name);
        self.alias = Some(card.alias);
        self.rounds_generated += 1;
        Ok(())
    }

    /// A fetch attempt failed. The session stays in Loading and no counter
    /// moves, the actor decides when the next attempt starts.
    pub fn round_failed(&mut self) -> Result<(), Error> {
        self.process_event(&SessionFsmInput::FetchFailed)
    }

    /// Exact, case-sensitive match against the answer key. Only legal while
    /// an alias is displayed.
    pub fn submit_guess(&mut self, guess: &str) -> Result<GuessResult, Error> {
        if self.state() != &SessionFsmState::Ready {
            return Err(Error::Domain(DomainError::InvalidStateForGuess(
                self.state().clone(),
                SessionFsmState::Ready,
            )));
        }

        if self.answer_name.as_deref() == Some(guess) {
            self.correct_guesses += 1;
            self.feedback = Some(CORRECT_FEEDBACK.to_string());
            Ok(GuessResult::Correct)
        } else {
            self.feedback = Some(WRONG_FEEDBACK.to_string());
            Ok(GuessResult::Wrong)
        }
    }

    /// Unconditional: the feedback timer is never cancelled, clearing an
    /// already replaced message is harmless because it only ever clears.
    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            state: self.state().clone(),
            alias: self.alias.clone(),
            feedback: self.feedback.clone(),
            rounds_generated: self.rounds_generated,
            correct_guesses: self.correct_guesses,
        }
    }

    fn process_event(&mut self, event: &SessionFsmInput) -> Result<(), Error> {
        match self.fsm.consume(event) {
            Ok(_) => Ok(()),
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))),
        }
    }
}
