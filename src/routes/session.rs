use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::session::actor_client::GuessOutcome;
use crate::session::SessionSnapshot;
use crate::session_factory::actor_client::SessionFactoryClient;

#[derive(Serialize)]
pub struct CreateSessionResponse {
    id: String,
}

#[derive(Deserialize)]
pub struct GuessRequest {
    guess: String,
}

/// The render model of the frontend: `state` drives the loading indicator,
/// `alias` the alias display, `feedback` the message area and the two
/// counters the counter elements.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStateResponse {
    id: String,
    state: String,
    alias: Option<String>,
    feedback: Option<String>,
    rounds_generated: u64,
    correct_guesses: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResponse {
    correct: bool,
    #[serde(flatten)]
    session: SessionStateResponse,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    r#type: String,
    title: String,
    detail: String,
}

impl From<SessionSnapshot> for SessionStateResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        SessionStateResponse {
            id: snapshot.id,
            state: snapshot.state.to_string(),
            alias: snapshot.alias,
            feedback: snapshot.feedback,
            rounds_generated: snapshot.rounds_generated,
            correct_guesses: snapshot.correct_guesses,
        }
    }
}

impl From<GuessOutcome> for GuessResponse {
    fn from(outcome: GuessOutcome) -> Self {
        GuessResponse {
            correct: outcome.correct,
            session: outcome.session.into(),
        }
    }
}

pub async fn create(State(session_factory): State<Arc<SessionFactoryClient>>) -> Response {
    match session_factory.create_session().await {
        Ok(id) => (StatusCode::OK, Json(CreateSessionResponse { id })).into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn state(
    State(session_factory): State<Arc<SessionFactoryClient>>,
    Path(session_id): Path<String>,
) -> Response {
    match get_snapshot(&session_factory, &session_id).await {
        Ok(snapshot) => {
            (StatusCode::OK, Json(SessionStateResponse::from(snapshot))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub async fn new_round(
    State(session_factory): State<Arc<SessionFactoryClient>>,
    Path(session_id): Path<String>,
) -> Response {
    let result = match session_factory.get_session(&session_id).await {
        Ok(session) => session.new_round().await,
        Err(error) => Err(error),
    };
    match result {
        Ok(snapshot) => {
            (StatusCode::OK, Json(SessionStateResponse::from(snapshot))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub async fn guess(
    State(session_factory): State<Arc<SessionFactoryClient>>,
    Path(session_id): Path<String>,
    Json(request): Json<GuessRequest>,
) -> Response {
    let result = match session_factory.get_session(&session_id).await {
        Ok(session) => session.submit_guess(&request.guess).await,
        Err(error) => Err(error),
    };
    match result {
        Ok(outcome) => (StatusCode::OK, Json(GuessResponse::from(outcome))).into_response(),
        Err(error) => error_response(error),
    }
}

async fn get_snapshot(
    session_factory: &SessionFactoryClient,
    session_id: &str,
) -> Result<SessionSnapshot, Error> {
    let session = session_factory.get_session(session_id).await?;
    session.state().await
}

fn error_response(error: Error) -> Response {
    let (status, error_type, title) = match &error {
        Error::Domain(DomainError::SessionDoesNotExist(_)) => (
            StatusCode::NOT_FOUND,
            "SESSION_DOES_NOT_EXIST",
            "The session does not exist",
        ),
        Error::Domain(DomainError::InvalidStateForGuess(_, _)) => (
            StatusCode::CONFLICT,
            "NO_ROUND_IN_PROGRESS",
            "There is no round awaiting a guess",
        ),
        Error::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER",
            "Internal Server error",
        ),
    };

    (
        status,
        Json(ErrorResponse {
            r#type: error_type.to_string(),
            title: title.to_string(),
            detail: error.to_string(),
        }),
    )
        .into_response()
}
