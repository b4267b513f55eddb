//! Command structs for engine write operations.
//!
//! These types group parameters for ledger mutations, keeping call sites
//! readable and making the presence/absence of each patched field explicit
//! instead of relying on sentinel values.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{BonusKind, TransactionKind};

/// Create a new ledger transaction.
#[derive(Clone, Debug)]
pub struct CreateTransactionCmd {
    pub user_id: Uuid,
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub bonus_minor: i64,
    pub bonus_kind: BonusKind,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

impl CreateTransactionCmd {
    #[must_use]
    pub fn new(
        user_id: Uuid,
        kind: TransactionKind,
        amount_minor: i64,
        category_id: Uuid,
        title: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind,
            amount_minor,
            bonus_minor: 0,
            bonus_kind: BonusKind::Empty,
            category_id,
            title: title.into(),
            description: None,
            currency: None,
            occurred_at: None,
        }
    }

    #[must_use]
    pub fn bonus(mut self, bonus_minor: i64, bonus_kind: BonusKind) -> Self {
        self.bonus_minor = bonus_minor;
        self.bonus_kind = bonus_kind;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    #[must_use]
    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }
}

/// Partially update an existing ledger transaction.
///
/// Every field is optional; an absent field leaves the stored value
/// untouched. The resulting row must still satisfy the amount and bonus
/// pairing invariants.
#[derive(Clone, Debug)]
pub struct UpdateTransactionCmd {
    pub user_id: Uuid,
    pub transaction_id: Uuid,

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

impl UpdateTransactionCmd {
    #[must_use]
    pub fn new(user_id: Uuid, transaction_id: Uuid) -> Self {
        Self {
            user_id,
            transaction_id,
            kind: None,
            amount_minor: None,
            bonus_minor: None,
            bonus_kind: None,
            category_id: None,
            title: None,
            description: None,
            currency: None,
            occurred_at: None,
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn amount_minor(mut self, amount_minor: i64) -> Self {
        self.amount_minor = Some(amount_minor);
        self
    }

    #[must_use]
    pub fn bonus_minor(mut self, bonus_minor: i64) -> Self {
        self.bonus_minor = Some(bonus_minor);
        self
    }

    #[must_use]
    pub fn bonus_kind(mut self, bonus_kind: BonusKind) -> Self {
        self.bonus_kind = Some(bonus_kind);
        self
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    #[must_use]
    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }
}
