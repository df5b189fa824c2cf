pub mod actor;
pub mod actor_client;

use std::collections::HashMap;
use std::sync::Arc;

use rand::distributions::{Alphanumeric, DistString};

use crate::catalog::CharacterSource;
use crate::config::SessionSettings;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::session::actor::SessionActor;
use crate::session::actor_client::SessionClient;
use crate::session_factory::actor_client::SessionFactoryClient;

pub struct SessionFactory {
    session_channels: HashMap<String, SessionClient>,
    session_settings: SessionSettings,
    source: Arc<dyn CharacterSource>,
}

impl SessionFactory {
    pub fn new(session_settings: SessionSettings, source: Arc<dyn CharacterSource>) -> Self {
        SessionFactory {
            session_channels: HashMap::default(),
            session_settings,
            source,
        }
    }

    pub fn create_new_session(&mut self, session_factory: SessionFactoryClient) -> String {
        let id = self.create_unique_session_id();
        self.session_channels.insert(
            id.clone(),
            SessionActor::spawn(
                &id,
                self.session_settings.clone(),
                Arc::clone(&self.source),
                session_factory,
            ),
        );

        id
    }

    pub fn remove_session(&mut self, session_id: &str) -> Option<SessionClient> {
        self.session_channels.remove(session_id)
    }

    pub fn get_session(&self, session_id: &str) -> Result<&SessionClient, Error> {
        match self.session_channels.get(session_id) {
            Some(session) => Ok(session),
            None => Err(Error::Domain(DomainError::SessionDoesNotExist(
                session_id.to_string(),
            ))),
        }
    }

    fn create_unique_session_id(&self) -> String {
        loop {
            // Ids end up in URLs typed by hand, swap the ambiguous characters
            let id = Alphanumeric
                .sample_string(&mut rand::thread_rng(), 5)
                .replace('O', "P")
                .replace('0', "1")
                .replace('I', "J")
                .replace('l', "m");
            if !self.session_channels.contains_key(&id) {
                return id;
            }
        }
    }
}
