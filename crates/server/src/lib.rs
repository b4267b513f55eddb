use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{router, run, run_with_listener, spawn_with_listener};

mod auth;
mod balance;
mod categories;
mod server;
mod transactions;

pub mod types {
    pub mod auth {
        pub use api_types::auth::{
            LoginRequest, MessageResponse, RegisterRequest, RegisterResponse, TokenResponse,
            VerifyRequest,
        };
    }

    pub mod transaction {
        pub use api_types::transaction::{
            BonusKind, SearchQuery, TransactionKind, TransactionNew, TransactionPatch,
            TransactionView,
        };
    }

    pub mod category {
        pub use api_types::category::{CategoryNew, CategoryPatch, CategoryView};
    }

    pub mod balance {
        pub use api_types::balance::{BalanceResponse, BalanceUpdate, BonusResponse, BonusUpdate};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) | EngineError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidBonus(_)
        | EngineError::InvalidName(_)
        | EngineError::InvalidPassword(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Hash(hash_err) => {
            tracing::error!("hash error: {hash_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
