use sea_orm::{ActiveValue, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, User, users};

use super::{Engine, with_tx};

impl Engine {
    /// Returns the user's current balances alongside the rest of the public
    /// profile.
    pub async fn user_balances(&self, user_id: Uuid) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            Ok(User::from(user))
        })
    }

    /// Overwrites the stored balance directly, bypassing the ledger.
    ///
    /// This is an escape hatch for seeding or correcting an account; the
    /// transaction history is left untouched.
    pub async fn set_balance(&self, user_id: Uuid, balance_minor: i64) -> ResultEngine<User> {
        if balance_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "balance_minor must be > 0".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            let active = users::ActiveModel {
                id: ActiveValue::Set(user.id),
                balance_minor: ActiveValue::Set(balance_minor),
                ..Default::default()
            };
            let updated = active.update(&db_tx).await?;
            Ok(User::from(updated))
        })
    }

    /// Overwrites the stored bonus balance directly, bypassing the ledger.
    pub async fn set_bonus(&self, user_id: Uuid, bonus_minor: i64) -> ResultEngine<User> {
        if bonus_minor <= 0 {
            return Err(EngineError::InvalidBonus(
                "bonus_minor must be > 0".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            let active = users::ActiveModel {
                id: ActiveValue::Set(user.id),
                bonus_minor: ActiveValue::Set(bonus_minor),
                ..Default::default()
            };
            let updated = active.update(&db_tx).await?;
            Ok(User::from(updated))
        })
    }
}
