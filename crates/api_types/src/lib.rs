//! Shared request/response bodies for the HTTP API.
//!
//! These types are the wire contract between the server and its clients and
//! deliberately mirror JSON shapes rather than engine internals.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    /// The verification code is returned in the response so an external
    /// delivery channel can pick it up; clients echo it back on verify.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterResponse {
        pub email: String,
        pub verification_code: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VerifyRequest {
        pub email: String,
        pub code: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenResponse {
        pub token: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MessageResponse {
        pub message: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// Bonus side of a transaction; the empty string means no bonus.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BonusKind {
        Income,
        Expense,
        #[default]
        #[serde(rename = "")]
        Empty,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub kind: TransactionKind,
        pub amount_minor: i64,
        #[serde(default)]
        pub bonus_minor: i64,
        #[serde(default)]
        pub bonus_kind: BonusKind,
        pub category_id: Uuid,
        pub title: String,
        pub description: Option<String>,
        pub currency: Option<String>,
        pub occurred_at: Option<DateTime<Utc>>,
    }

    /// Partial update; absent fields keep their stored value.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionPatch {
        pub kind: Option<TransactionKind>,
        pub amount_minor: Option<i64>,
        pub bonus_minor: Option<i64>,
        pub bonus_kind: Option<BonusKind>,
        pub category_id: Option<Uuid>,
        pub title: Option<String>,
        pub description: Option<String>,
        pub currency: Option<String>,
        pub occurred_at: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub amount_minor: i64,
        pub bonus_minor: i64,
        pub bonus_kind: BonusKind,
        pub category_id: Uuid,
        pub title: String,
        pub description: Option<String>,
        pub currency: String,
        pub occurred_at: DateTime<Utc>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Query parameters for searching transactions. All are optional and
    /// combine with AND.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SearchQuery {
        pub title: Option<String>,
        pub description: Option<String>,
        pub amount_minor: Option<i64>,
        pub bonus_minor: Option<i64>,
        /// Calendar day filter; the offset the client sends decides where
        /// the day starts and ends.
        pub date: Option<DateTime<FixedOffset>>,
        pub category_id: Option<Uuid>,
        pub kind: Option<TransactionKind>,
        pub bonus_kind: Option<BonusKind>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        pub color: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryPatch {
        pub name: Option<String>,
        pub color: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        pub color: String,
        /// True for the global categories every user sees.
        pub is_default: bool,
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceResponse {
        pub balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceUpdate {
        pub balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BonusResponse {
        pub bonus_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BonusUpdate {
        pub bonus_minor: i64,
    }
}
