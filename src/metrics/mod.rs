use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_SESSIONS: IntGauge =
        IntGauge::new("faceless_active_sessions", "Active trivia sessions")
            .expect("metric cannot be created");
    pub static ref ROUNDS_GENERATED: IntCounter = IntCounter::new(
        "faceless_rounds_generated",
        "Rounds successfully generated across all sessions"
    )
    .expect("metric cannot be created");
    pub static ref CORRECT_GUESSES: IntCounter = IntCounter::new(
        "faceless_correct_guesses",
        "Correct guesses across all sessions"
    )
    .expect("metric cannot be created");
    pub static ref FETCH_RETRIES: IntCounter = IntCounter::new(
        "faceless_fetch_retries",
        "Failed character fetches that triggered a retry"
    )
    .expect("metric cannot be created");
}

pub fn register_metrics() {
    REGISTRY
        .register(Box::new(ACTIVE_SESSIONS.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(ROUNDS_GENERATED.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(CORRECT_GUESSES.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(FETCH_RETRIES.clone()))
        .expect("collector cannot be registered");
}
