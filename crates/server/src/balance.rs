use axum::{Extension, Json, extract::State};

use engine::User;

use crate::{
    ServerError,
    server::ServerState,
    types::balance::{BalanceResponse, BalanceUpdate, BonusResponse, BonusUpdate},
};

pub async fn get_balance(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
) -> Result<Json<BalanceResponse>, ServerError> {
    let user = state.engine.user_balances(user.id).await?;
    Ok(Json(BalanceResponse {
        balance_minor: user.balance_minor,
    }))
}

pub async fn set_balance(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    Json(payload): Json<BalanceUpdate>,
) -> Result<Json<BalanceResponse>, ServerError> {
    let user = state
        .engine
        .set_balance(user.id, payload.balance_minor)
        .await?;
    Ok(Json(BalanceResponse {
        balance_minor: user.balance_minor,
    }))
}

pub async fn get_bonus(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
) -> Result<Json<BonusResponse>, ServerError> {
    let user = state.engine.user_balances(user.id).await?;
    Ok(Json(BonusResponse {
        bonus_minor: user.bonus_minor,
    }))
}

pub async fn set_bonus(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    Json(payload): Json<BonusUpdate>,
) -> Result<Json<BonusResponse>, ServerError> {
    let user = state.engine.set_bonus(user.id, payload.bonus_minor).await?;
    Ok(Json(BonusResponse {
        bonus_minor: user.bonus_minor,
    }))
}
