use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::time;

use crate::catalog::{CharacterCard, CharacterSource};
use crate::config::SessionSettings;
use crate::error::fetch_error::FetchError;
use crate::error::Error;
use crate::metrics::{ACTIVE_SESSIONS, CORRECT_GUESSES, FETCH_RETRIES, ROUNDS_GENERATED};
use crate::session::actor_client::SessionClient;
use crate::session::{GuessResult, Session, SessionSnapshot};
use crate::session_factory::actor_client::SessionFactoryClient;

pub struct SessionActor {
    session: Session,
    session_rx: Receiver<SessionCommand>,
    session_tx: Sender<SessionCommand>,
    source: Arc<dyn CharacterSource>,
    settings: SessionSettings,
    session_factory: SessionFactoryClient,
    // Identifies the round request a fetch task belongs to. A result carrying
    // an old generation lost the race against a newer request and is dropped.
    generation: u64,
}

impl SessionActor {
    pub fn spawn(
        id: &str,
        settings: SessionSettings,
        source: Arc<dyn CharacterSource>,
        session_factory: SessionFactoryClient,
    ) -> SessionClient {
        let session = Session::new(id);
        let (session_tx, session_rx): (Sender<SessionCommand>, Receiver<SessionCommand>) =
            mpsc::channel(128);

        tokio::spawn(
            SessionActor {
                session,
                session_rx,
                session_tx: session_tx.clone(),
                source,
                settings,
                session_factory,
                generation: 0,
            }
            .start(),
        );

        SessionClient { session_tx }
    }

    async fn start(mut self) {
        ACTIVE_SESSIONS.inc();
        // A session is born loading its first round
        self.start_round();

        let mut last_activity = time::Instant::now();

        loop {
            // Only player commands reset the inactivity clock. The actor's own
            // fetch results and feedback timers arrive continuously while the
            // upstream is down and must not keep an abandoned session alive.
            let remaining = self
                .settings
                .inactivity_timeout()
                .saturating_sub(last_activity.elapsed());
            if remaining.is_zero() {
                log::info!(
                    "No activity detected in session {} after {} seconds. Stopping session actor.",
                    self.session.id(),
                    self.settings.inactivity_timeout().as_secs()
                );
                break;
            }
            match time::timeout(remaining, self.session_rx.recv()).await {
                Err(_) => {
                    log::info!(
                        "No activity detected in session {} after {} seconds. Stopping session actor.",
                        self.session.id(),
                        self.settings.inactivity_timeout().as_secs()
                    );
                    break;
                }
                Ok(None) => {
                    log::info!("Session channel has been dropped. Stopping session actor.");
                    break;
                }
                Ok(Some(command)) => {
                    if command.is_player_command() {
                        last_activity = time::Instant::now();
                    }
                    let response = match command {
                        SessionCommand::GetState { response_tx } => Some((
                            SessionEvent::State {
                                snapshot: self.session.snapshot(),
                            },
                            response_tx,
                        )),
                        SessionCommand::NewRound { response_tx } => {
                            self.start_round();
                            Some((
                                SessionEvent::State {
                                    snapshot: self.session.snapshot(),
                                },
                                response_tx,
                            ))
                        }
                        SessionCommand::SubmitGuess { guess, response_tx } => {
                            let event = match self.session.submit_guess(&guess) {
                                Ok(GuessResult::Correct) => {
                                    CORRECT_GUESSES.inc();
                                    self.schedule_feedback_clear();
                                    // A correct guess rolls straight into the next round
                                    self.start_round();
                                    SessionEvent::Guess {
                                        correct: true,
                                        snapshot: self.session.snapshot(),
                                    }
                                }
                                Ok(GuessResult::Wrong) => {
                                    self.schedule_feedback_clear();
                                    SessionEvent::Guess {
                                        correct: false,
                                        snapshot: self.session.snapshot(),
                                    }
                                }
                                Err(error) => SessionEvent::Error { error },
                            };
                            Some((event, response_tx))
                        }
                        SessionCommand::RoundFetched { generation, result } => {
                            self.handle_round_fetched(generation, result);
                            None
                        }
                        SessionCommand::ClearFeedback => {
                            self.session.clear_feedback();
                            None
                        }
                    };
                    if let Some((event, response_tx)) = response {
                        if let Err(event) = response_tx.send(event) {
                            log::error!(
                                "Sent a SessionEvent but the response channel is closed. SessionId: '{}', Event: '{event}'.",
                                self.session.id()
                            );
                        }
                    }
                }
            }
        }

        self.stop_session().await;
        ACTIVE_SESSIONS.dec();
    }

    fn handle_round_fetched(
        &mut self,
        generation: u64,
        result: Result<CharacterCard, FetchError>,
    ) {
        if generation != self.generation {
            log::debug!(
                "Dropping a stale fetch result. SessionId: '{}', Generation: '{generation}', CurrentGeneration: '{}'.",
                self.session.id(),
                self.generation
            );
            return;
        }

        match result {
            Ok(card) => {
                if let Err(error) = self.session.round_ready(card) {
                    log::error!(
                        "Could not apply a fetched round. SessionId: '{}', Error: '{error}'.",
                        self.session.id()
                    );
                } else {
                    ROUNDS_GENERATED.inc();
                }
            }
            Err(error) => {
                // Every failure is handled the same way: stay Loading and try again
                log::warn!(
                    "Character fetch failed, retrying. SessionId: '{}', Error: '{error}'.",
                    self.session.id()
                );
                FETCH_RETRIES.inc();
                if let Err(error) = self.session.round_failed() {
                    log::error!(
                        "Could not record a failed round. SessionId: '{}', Error: '{error}'.",
                        self.session.id()
                    );
                }
                self.spawn_fetch(self.settings.retry_delay());
            }
        }
    }

    fn start_round(&mut self) {
        self.generation += 1;
        if let Err(error) = self.session.begin_round() {
            log::error!(
                "Could not start a new round. SessionId: '{}', Error: '{error}'.",
                self.session.id()
            );
            return;
        }
        self.spawn_fetch(Duration::ZERO);
    }

    fn spawn_fetch(&self, delay: Duration) {
        let source = Arc::clone(&self.source);
        let session_tx = self.session_tx.clone();
        let generation = self.generation;

        tokio::spawn(async move {
            if !delay.is_zero() {
                time::sleep(delay).await;
            }
            let result = source.fetch_random_character().await;
            // The session may have stopped while the fetch was in flight
            let _ = session_tx
                .send(SessionCommand::RoundFetched { generation, result })
                .await;
        });
    }

    fn schedule_feedback_clear(&self) {
        let session_tx = self.session_tx.clone();
        let timeout = self.settings.feedback_timeout();

        // Deliberately not cancelled when a new round starts first: clearing
        // always clears to nothing, whatever message is displayed by then
        tokio::spawn(async move {
            time::sleep(timeout).await;
            let _ = session_tx.send(SessionCommand::ClearFeedback).await;
        });
    }

    async fn stop_session(self) {
        let session_id = self.session.id();
        if let Err(error) = self.session_factory.remove_session(session_id).await {
            log::error!(
                "The SessionFactory channel is closed, can't remove the Session. SessionId: '{session_id}', Error: '{error}'."
            );
        }
    }
}

pub enum SessionCommand {
    GetState {
        response_tx: OneshotSender<SessionEvent>,
    },
    NewRound {
        response_tx: OneshotSender<SessionEvent>,
    },
    SubmitGuess {
        guess: String,
        response_tx: OneshotSender<SessionEvent>,
    },
    RoundFetched {
        generation: u64,
        result: Result<CharacterCard, FetchError>,
    },
    ClearFeedback,
}

impl SessionCommand {
    /// Whether the command came from a player rather than from one of the
    /// actor's own background tasks.
    fn is_player_command(&self) -> bool {
        matches!(
            self,
            SessionCommand::GetState { .. }
                | SessionCommand::NewRound { .. }
                | SessionCommand::SubmitGuess { .. }
        )
    }
}

pub enum SessionEvent {
    State { snapshot: SessionSnapshot },
    Guess { correct: bool, snapshot: SessionSnapshot },
    Error { error: Error },
}

impl Display for SessionEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                SessionEvent::State { snapshot } =>
                    format!("State(state: {})", snapshot.state),
                SessionEvent::Guess { correct, .. } => format!("Guess(correct: {correct})"),
                SessionEvent::Error { error } => format!("Error(error: {error})"),
            }
        )
    }
}
