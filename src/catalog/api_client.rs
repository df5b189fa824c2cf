use async_trait::async_trait;
use rand::{thread_rng, Rng};

use crate::catalog::{CharacterCard, CharacterRecord, CharacterSource};
use crate::config::CharacterApiSettings;
use crate::error::fetch_error::FetchError;

/// `CharacterSource` backed by the public character API. One GET per call,
/// no retries here, the session actor owns the retry policy.
pub struct CharacterApiClient {
    http_client: reqwest::Client,
    settings: CharacterApiSettings,
}

impl CharacterApiClient {
    pub fn new(settings: CharacterApiSettings) -> Self {
        CharacterApiClient {
            http_client: reqwest::Client::new(),
            settings,
        }
    }

    fn choose_character_id(&self) -> u32 {
        thread_rng().gen_range(1..=self.settings.catalog_size)
    }
}

#[async_trait]
impl CharacterSource for CharacterApiClient {
    async fn fetch_random_character(&self) -> Result<CharacterCard, FetchError> {
        let character_id = self.choose_character_id();
        let url = format!("{}/{}", self.settings.base_url, character_id);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|error| FetchError::Network(error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| FetchError::Network(error.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let record: CharacterRecord =
            serde_json::from_str(&body).map_err(|error| FetchError::Malformed(error.to_string()))?;

        record.into_card(character_id)
    }
}
