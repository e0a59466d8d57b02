use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    controller::{
        collector::get_collector,
        config::{get_config, update_config},
        event::create_event,
        punishment::issue_punishment,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/config", get(get_config).put(update_config))
        .route("/api/collectors/{message_id}", get(get_collector))
        .route("/api/punishments", post(issue_punishment))
        .route("/api/events", post(create_event))
}
