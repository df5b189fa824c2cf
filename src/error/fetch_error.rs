use thiserror::Error;

/// Everything that can go wrong while fetching a character. All variants are
/// handled the same way by the session actor: log, count, retry.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FetchError {
    #[error("The request to the character API could not complete. Error: '{0}'.")]
    Network(String),
    #[error("The character API returned a failure status. Status: '{status}', Body: '{body}'.")]
    HttpStatus { status: u16, body: String },
    #[error("The character API returned a body that is not a character record. Error: '{0}'.")]
    Malformed(String),
    #[error("The character has no usable name or aliases. CharacterId: '{character_id}'.")]
    EmptyData { character_id: u32 },
}
