use std::time::Duration;

use tokio::time;

use crate::helpers::mock_api::{MockCharacterApi, MockResponse};
use crate::helpers::{ErrorResponse, TestApp};

const JON_SNOW_ALIASES: [&str; 2] = ["Lord Snow", "King in the North"];

#[tokio::test]
async fn full_round_trip_against_a_healthy_catalog() {
    let mock_api = MockCharacterApi::spawn(
        vec![],
        MockResponse::character("Jon Snow", &JON_SNOW_ALIASES),
    )
    .await;
    let app = TestApp::spawn_app(&mock_api).await;

    let session_id = app.create_session().await;

    let state = app.wait_until_ready(&session_id).await;
    assert_eq!(state.id, session_id);
    assert_eq!(state.rounds_generated, 1);
    assert_eq!(state.correct_guesses, 0);
    let alias = state.alias.expect("A Ready session must display an alias.");
    assert!(JON_SNOW_ALIASES.contains(&alias.as_str()));

    // A wrong guess keeps the alias and the counters
    let outcome = app.submit_guess(&session_id, "Ned Stark").await;
    assert!(!outcome.correct);
    assert_eq!(outcome.session.state, "Ready");
    assert_eq!(outcome.session.alias.as_deref(), Some(alias.as_str()));
    assert_eq!(outcome.session.rounds_generated, 1);
    assert_eq!(outcome.session.correct_guesses, 0);
    assert_eq!(
        outcome.session.feedback.as_deref(),
        Some("Oops, that was incorrect! Enter try again or refresh.")
    );

    // A correct guess bumps the counter and rolls straight into the next round
    let outcome = app.submit_guess(&session_id, "Jon Snow").await;
    assert!(outcome.correct);
    assert_eq!(outcome.session.state, "Loading");
    assert_eq!(outcome.session.alias, None);
    assert_eq!(outcome.session.correct_guesses, 1);
    assert_eq!(
        outcome.session.feedback.as_deref(),
        Some("Good job, you got it right!")
    );

    let state = app.wait_until_ready(&session_id).await;
    assert_eq!(state.rounds_generated, 2);
    assert_eq!(state.correct_guesses, 1);
}

#[tokio::test]
async fn guesses_are_case_sensitive() {
    let mock_api = MockCharacterApi::spawn(
        vec![],
        MockResponse::character("Jon Snow", &JON_SNOW_ALIASES),
    )
    .await;
    let app = TestApp::spawn_app(&mock_api).await;

    let session_id = app.create_session().await;
    app.wait_until_ready(&session_id).await;

    let outcome = app.submit_guess(&session_id, "jon snow").await;

    assert!(!outcome.correct);
    assert_eq!(outcome.session.correct_guesses, 0);
}

#[tokio::test]
async fn feedback_is_cleared_after_the_configured_interval() {
    let mock_api = MockCharacterApi::spawn(
        vec![],
        MockResponse::character("Jon Snow", &JON_SNOW_ALIASES),
    )
    .await;
    let app = TestApp::spawn_app(&mock_api).await;

    let session_id = app.create_session().await;
    app.wait_until_ready(&session_id).await;

    let outcome = app.submit_guess(&session_id, "Ned Stark").await;
    assert!(outcome.session.feedback.is_some());

    let state = app
        .wait_for_state(&session_id, "feedback cleared", |state| {
            state.feedback.is_none()
        })
        .await;
    // Clearing the message changes nothing else
    assert_eq!(state.state, "Ready");
    assert_eq!(state.rounds_generated, 1);
}

#[tokio::test]
async fn unusable_records_are_retried_until_a_playable_one_appears() {
    // The empty record, the failure status and the record with an unusable
    // alias list must all be skipped without counting a round
    let mock_api = MockCharacterApi::spawn(
        vec![
            MockResponse::character("", &[""]),
            MockResponse::failing(500, "upstream exploded"),
            MockResponse::character("Jon Snow", &[""]),
        ],
        MockResponse::character("Arya Stark", &["No One"]),
    )
    .await;
    let app = TestApp::spawn_app(&mock_api).await;

    let session_id = app.create_session().await;

    let state = app.wait_until_ready(&session_id).await;
    assert_eq!(state.alias.as_deref(), Some("No One"));
    assert_eq!(state.rounds_generated, 1);
    assert_eq!(state.correct_guesses, 0);
}

#[tokio::test]
async fn an_explicit_refresh_generates_a_new_round() {
    let mock_api = MockCharacterApi::spawn(
        vec![],
        MockResponse::character("Jon Snow", &JON_SNOW_ALIASES),
    )
    .await;
    let app = TestApp::spawn_app(&mock_api).await;

    let session_id = app.create_session().await;
    app.wait_until_ready(&session_id).await;

    let state = app.new_round(&session_id).await;
    assert_eq!(state.state, "Loading");
    assert_eq!(state.alias, None);

    let state = app
        .wait_for_state(&session_id, "second round ready", |state| {
            state.state == "Ready" && state.rounds_generated == 2
        })
        .await;
    assert!(state.alias.is_some());
}

#[tokio::test]
async fn a_refresh_during_loading_wins_over_the_stale_fetch() {
    let mock_api = MockCharacterApi::spawn(
        vec![MockResponse::character("Stale Character", &["Stale Alias"])
            .with_delay(Duration::from_millis(300))],
        MockResponse::character("Fresh Character", &["Fresh Alias"]),
    )
    .await;
    let app = TestApp::spawn_app(&mock_api).await;

    // The first fetch is stuck on the slow response, refresh while it loads
    let session_id = app.create_session().await;
    app.new_round(&session_id).await;

    let state = app.wait_until_ready(&session_id).await;
    assert_eq!(state.alias.as_deref(), Some("Fresh Alias"));
    assert_eq!(state.rounds_generated, 1);

    // Once the slow response lands it must be dropped, not displayed
    time::sleep(Duration::from_millis(500)).await;
    let state = app.get_state(&session_id).await;
    assert_eq!(state.alias.as_deref(), Some("Fresh Alias"));
    assert_eq!(state.rounds_generated, 1);

    let outcome = app.submit_guess(&session_id, "Fresh Character").await;
    assert!(outcome.correct);
}

#[tokio::test]
async fn guessing_before_the_first_round_is_ready_is_rejected() {
    let mock_api = MockCharacterApi::spawn(
        vec![],
        MockResponse::character("Jon Snow", &JON_SNOW_ALIASES)
            .with_delay(Duration::from_secs(5)),
    )
    .await;
    let app = TestApp::spawn_app(&mock_api).await;

    let session_id = app.create_session().await;

    let response = app.submit_guess_response(&session_id, "Jon Snow").await;

    assert_eq!(response.status().as_u16(), 409);
    let error: ErrorResponse = response
        .json()
        .await
        .expect("Failed to parse ErrorResponse.");
    assert_eq!(error.error_type, "NO_ROUND_IN_PROGRESS");
    assert!(!error.title.is_empty());
    assert!(!error.detail.is_empty());
}

#[tokio::test]
async fn an_abandoned_session_is_reaped_even_while_the_upstream_is_down() {
    // A permanent outage keeps the retry loop sending the actor its own
    // fetch results, those must not count as activity
    let mock_api =
        MockCharacterApi::spawn(vec![], MockResponse::failing(500, "upstream exploded")).await;
    let app = TestApp::spawn_app_with_session_settings(&mock_api, 100, 1).await;

    let session_id = app.create_session().await;

    // No player requests while the session retries against the outage
    time::sleep(Duration::from_secs(3)).await;

    let response = app.get_state_response(&session_id).await;
    assert_eq!(response.status().as_u16(), 404);
    let error: ErrorResponse = response
        .json()
        .await
        .expect("Failed to parse ErrorResponse.");
    assert_eq!(error.error_type, "SESSION_DOES_NOT_EXIST");
}

#[tokio::test]
async fn unknown_session_returns_not_found() {
    let mock_api =
        MockCharacterApi::spawn(vec![], MockResponse::character("Jon Snow", &["Lord Snow"])).await;
    let app = TestApp::spawn_app(&mock_api).await;

    let response = app.get_state_response("WRONG").await;
    assert_eq!(response.status().as_u16(), 404);
    let error: ErrorResponse = response
        .json()
        .await
        .expect("Failed to parse ErrorResponse.");
    assert_eq!(error.error_type, "SESSION_DOES_NOT_EXIST");

    let response = app.submit_guess_response("WRONG", "Jon Snow").await;
    assert_eq!(response.status().as_u16(), 404);
}
