use axum::{Json, extract::State, http::StatusCode};

use crate::{
    ServerError,
    server::ServerState,
    types::auth::{
        LoginRequest, MessageResponse, RegisterRequest, RegisterResponse, TokenResponse,
        VerifyRequest,
    },
};

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ServerError> {
    let (user, verification_code) = state
        .engine
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            email: user.email,
            verification_code,
        }),
    ))
}

pub async fn verify(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyRequest>,
) -> Result<Json<MessageResponse>, ServerError> {
    state
        .engine
        .verify_email(&payload.email, &payload.code)
        .await?;
    Ok(Json(MessageResponse {
        message: "account verified".to_string(),
    }))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ServerError> {
    let token = state.engine.login(&payload.email, &payload.password).await?;
    Ok(Json(TokenResponse { token }))
}
