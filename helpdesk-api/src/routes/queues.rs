/// Queue endpoints
///
/// Queues are read-only through the API; they are the ids accepted in
/// `queue_ids` when updating a user.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use helpdesk_shared::models::queue::{Queue, QueueSummary};

/// List queues endpoint
///
/// # Endpoint
///
/// ```text
/// GET /v1/queues
/// Authorization: Bearer <access token>
/// ```
///
/// # Response
///
/// ```json
/// [{ "id": "uuid", "name": "Support", "color": "#ff0000" }]
/// ```
///
/// Ordered by name.
pub async fn list_queues(State(state): State<AppState>) -> ApiResult<Json<Vec<QueueSummary>>> {
    let queues = Queue::list(&state.db).await?;

    Ok(Json(queues.into_iter().map(QueueSummary::from).collect()))
}
