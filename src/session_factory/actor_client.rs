use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::session::actor_client::SessionClient;
use crate::session_factory::actor::{SessionFactoryCommand, SessionFactoryResponse};

#[derive(Clone, Debug)]
pub struct SessionFactoryClient {
    pub(super) session_factory_tx: Sender<SessionFactoryCommand>,
}

impl SessionFactoryClient {
    pub async fn create_session(&self) -> Result<String, Error> {
        let (tx, rx): (
            OneshotSender<SessionFactoryResponse>,
            OneshotReceiver<SessionFactoryResponse>,
        ) = oneshot::channel();

        self.session_factory_tx
            .send(SessionFactoryCommand::CreateSession {
                response_channel: tx,
            })
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "The SessionFactory channel is closed. Error: '{error}'."
                ))
            })?;

        match rx.await {
            Ok(SessionFactoryResponse::SessionCreated { session_id }) => Ok(session_id),
            Ok(SessionFactoryResponse::Error { error }) => Err(error),
            Ok(unexpected_response) => Err(Error::log_and_create_internal(&format!(
                "Received an unexpected SessionFactoryResponse. Response: '{unexpected_response}'."
            ))),
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "The SessionFactory response channel is closed. Error: '{error}'."
            ))),
        }
    }

    pub async fn get_session(&self, session_id: &str) -> Result<SessionClient, Error> {
        let (tx, rx): (
            OneshotSender<SessionFactoryResponse>,
            OneshotReceiver<SessionFactoryResponse>,
        ) = oneshot::channel();

        self.session_factory_tx
            .send(SessionFactoryCommand::GetSessionActor {
                session_id: session_id.to_string(),
                response_channel: tx,
            })
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "The SessionFactory channel is closed. Error: '{error}'."
                ))
            })?;

        match rx.await {
            Ok(SessionFactoryResponse::SessionActor { session }) => Ok(session),
            Ok(SessionFactoryResponse::Error { error }) => Err(error),
            Ok(unexpected_response) => Err(Error::log_and_create_internal(&format!(
                "Received an unexpected SessionFactoryResponse. Response: '{unexpected_response}'."
            ))),
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "The SessionFactory response channel is closed. Error: '{error}'."
            ))),
        }
    }

    pub async fn remove_session(&self, session_id: &str) -> Result<(), Error> {
        self.session_factory_tx
            .send(SessionFactoryCommand::RemoveSession {
                session_id: session_id.to_string(),
            })
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "Tried to send SessionFactoryCommand::RemoveSession but the SessionFactoryActor is not listening. Error: '{error}'."
                ))
            })
    }
}
