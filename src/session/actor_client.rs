use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::session::actor::{SessionCommand, SessionEvent};
use crate::session::SessionSnapshot;

#[derive(Clone, Debug)]
pub struct SessionClient {
    pub(super) session_tx: Sender<SessionCommand>,
}

/// What a guess submission came back with: whether it matched, and the
/// session as it looks right after (a correct guess is already Loading the
/// next round by then).
#[derive(Clone, Debug)]
pub struct GuessOutcome {
    pub correct: bool,
    pub session: SessionSnapshot,
}

impl SessionClient {
    pub async fn state(&self) -> Result<SessionSnapshot, Error> {
        let (tx, rx): (OneshotSender<SessionEvent>, OneshotReceiver<SessionEvent>) =
            oneshot::channel();

        self.session_tx
            .send(SessionCommand::GetState { response_tx: tx })
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "Tried to send SessionCommand::GetState but the SessionActor is not listening. Error: '{error}'."
                ))
            })?;

        match rx.await {
            Ok(SessionEvent::State { snapshot }) => Ok(snapshot),
            Ok(SessionEvent::Error { error }) => Err(error),
            _ => Err(Error::log_and_create_internal(
                "Sent a SessionCommand::GetState to the Session, but the Session channel died.",
            )),
        }
    }

    pub async fn new_round(&self) -> Result<SessionSnapshot, Error> {
        let (tx, rx): (OneshotSender<SessionEvent>, OneshotReceiver<SessionEvent>) =
            oneshot::channel();

        self.session_tx
            .send(SessionCommand::NewRound { response_tx: tx })
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "Tried to send SessionCommand::NewRound but the SessionActor is not listening. Error: '{error}'."
                ))
            })?;

        match rx.await {
            Ok(SessionEvent::State { snapshot }) => Ok(snapshot),
            Ok(SessionEvent::Error { error }) => Err(error),
            _ => Err(Error::log_and_create_internal(
                "Sent a SessionCommand::NewRound to the Session, but the Session channel died.",
            )),
        }
    }

    pub async fn submit_guess(&self, guess: &str) -> Result<GuessOutcome, Error> {
        let (tx, rx): (OneshotSender<SessionEvent>, OneshotReceiver<SessionEvent>) =
            oneshot::channel();

        self.session_tx
            .send(SessionCommand::SubmitGuess {
                guess: guess.to_string(),
                response_tx: tx,
            })
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "Tried to send SessionCommand::SubmitGuess but the SessionActor is not listening. Error: '{error}'."
                ))
            })?;

        match rx.await {
            Ok(SessionEvent::Guess { correct, snapshot }) => Ok(GuessOutcome {
                correct,
                session: snapshot,
            }),
            Ok(SessionEvent::Error { error }) => Err(error),
            _ => Err(Error::log_and_create_internal(
                "Sent a SessionCommand::SubmitGuess to the Session, but the Session channel died.",
            )),
        }
    }
}
