use axum::{extract::State, response::IntoResponse, response::Response};
use axum_helpers::{run_health_checks, HealthCheckFuture};

/// Readiness probe: verifies the database connection is alive.
pub async fn ready_handler(State(state): State<crate::state::AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    match run_health_checks(checks).await {
        Ok(response) => response.into_response(),
        Err(response) => response.into_response(),
    }
}
