//! HTTP routes
//!
//! Wires the registration workflow onto `POST /register` and a static
//! liveness message onto `GET /`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::auth::Registrar;
use crate::error::ApiError;
use crate::protocol::RegisterRequest;
use crate::protocol::responses::{MessageBody, ROOT_MESSAGE, RegisteredBody};

/// Build the API routes over a registrar.
pub fn api_routes(registrar: Registrar) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/register", post(handle_register))
        .with_state(registrar)
}

async fn handle_root() -> Json<MessageBody> {
    Json(MessageBody {
        message: ROOT_MESSAGE,
    })
}

async fn handle_register(
    State(registrar): State<Registrar>,
    request: RegisterRequest,
) -> Result<(StatusCode, Json<RegisteredBody>), ApiError> {
    let registration = registrar
        .register(request.username, request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredBody::new(registration.username)),
    ))
}
