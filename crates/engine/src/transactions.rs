//! Transaction primitives.
//!
//! A `Transaction` is a dated income or expense of a single user. Its signed
//! effect on the user's balance (and, for the bonus side, on the bonus
//! balance) is always exactly the one implied by its current stored fields.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

pub const DEFAULT_CURRENCY: &str = "RUB";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Signed effect of an amount on the balance: income adds, expense
    /// subtracts.
    pub fn signed(self, amount_minor: i64) -> i64 {
        match self {
            Self::Income => amount_minor,
            Self::Expense => -amount_minor,
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidName(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// Sign driver for the bonus side of a transaction.
///
/// `Empty` pairs with a zero `bonus_minor` and contributes nothing to the
/// bonus balance; the two non-empty kinds pair with a non-zero value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    Income,
    Expense,
    #[default]
    #[serde(rename = "")]
    Empty,
}

impl BonusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Empty => "",
        }
    }

    pub fn signed(self, bonus_minor: i64) -> i64 {
        match self {
            Self::Income => bonus_minor,
            Self::Expense => -bonus_minor,
            Self::Empty => 0,
        }
    }
}

impl TryFrom<&str> for BonusKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "" => Ok(Self::Empty),
            other => Err(EngineError::InvalidName(format!(
                "invalid bonus kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
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
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Signed balance effect of this transaction as stored.
    pub fn balance_effect(&self) -> i64 {
        self.kind.signed(self.amount_minor)
    }

    /// Signed bonus effect of this transaction as stored.
    pub fn bonus_effect(&self) -> i64 {
        self.bonus_kind.signed(self.bonus_minor)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub amount_minor: i64,
    pub bonus_minor: i64,
    pub bonus_kind: String,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub currency: String,
    pub occurred_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Categories,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id),
            user_id: ActiveValue::Set(tx.user_id),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(tx.amount_minor),
            bonus_minor: ActiveValue::Set(tx.bonus_minor),
            bonus_kind: ActiveValue::Set(tx.bonus_kind.as_str().to_string()),
            category_id: ActiveValue::Set(tx.category_id),
            title: ActiveValue::Set(tx.title.clone()),
            description: ActiveValue::Set(tx.description.clone()),
            currency: ActiveValue::Set(tx.currency.clone()),
            occurred_at: ActiveValue::Set(tx.occurred_at),
            created_at: ActiveValue::Set(tx.created_at),
            updated_at: ActiveValue::Set(tx.updated_at),
            deleted_at: ActiveValue::Set(tx.deleted_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount_minor: model.amount_minor,
            bonus_minor: model.bonus_minor,
            bonus_kind: BonusKind::try_from(model.bonus_kind.as_str())?,
            category_id: model.category_id,
            title: model.title,
            description: model.description,
            currency: model.currency,
            occurred_at: model.occurred_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_round_trip() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            assert_eq!(TransactionKind::try_from(kind.as_str()).unwrap(), kind);
        }
        for kind in [BonusKind::Income, BonusKind::Expense, BonusKind::Empty] {
            assert_eq!(BonusKind::try_from(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_labels_are_name_errors() {
        assert!(matches!(
            TransactionKind::try_from("transfer"),
            Err(EngineError::InvalidName(_))
        ));
        assert!(matches!(
            BonusKind::try_from("transfer"),
            Err(EngineError::InvalidName(_))
        ));
    }
}
