pub mod api_client;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::Deserialize;

use crate::error::fetch_error::FetchError;

/// A character as the catalog returns it. The upstream record carries many
/// more fields, only the ones the game needs are kept.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CharacterRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// One playable round: the answer key and the single alias chosen for display.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterCard {
    pub name: String,
    pub alias: String,
}

/// Where rounds come from. The production implementation talks to the public
/// character API, tests plug in scripted sources.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    async fn fetch_random_character(&self) -> Result<CharacterCard, FetchError>;
}

impl CharacterRecord {
    /// An empty name or an empty first alias is the catalog's signal that
    /// there is no usable data at this identifier.
    pub fn into_card(self, character_id: u32) -> Result<CharacterCard, FetchError> {
        if self.name.is_empty() {
            return Err(FetchError::EmptyData { character_id });
        }
        match self.aliases.first() {
            Some(first_alias) if !first_alias.is_empty() => {
                let mut rng = thread_rng();
                let alias = self
                    .aliases
                    .choose(&mut rng)
                    .cloned()
                    .unwrap_or_else(|| first_alias.clone());
                Ok(CharacterCard {
                    name: self.name,
                    alias,
                })
            }
            _ => Err(FetchError::EmptyData { character_id }),
        }
    }
}
