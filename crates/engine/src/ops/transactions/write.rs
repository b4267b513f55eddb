use chrono::Utc;
use uuid::Uuid;

use sea_orm::{ActiveValue, DatabaseTransaction, TransactionTrait, prelude::*};

use crate::{
    CreateTransactionCmd, ResultEngine, Transaction, UpdateTransactionCmd,
    transactions::{self, DEFAULT_CURRENCY},
    users,
};

use super::super::{Engine, normalize_optional_text, normalize_required_name, with_tx};
use super::{validate_amount, validate_bonus_pairing};

/// Writes the ledger delta into the user's denormalized balances.
///
/// Every path that inserts, rewrites or removes a live transaction must go
/// through here with the matching signed delta, inside the same DB
/// transaction as the row change.
async fn apply_user_deltas(
    db_tx: &DatabaseTransaction,
    user: &users::Model,
    balance_delta: i64,
    bonus_delta: i64,
) -> ResultEngine<()> {
    if balance_delta == 0 && bonus_delta == 0 {
        return Ok(());
    }
    let active = users::ActiveModel {
        id: ActiveValue::Set(user.id),
        balance_minor: ActiveValue::Set(user.balance_minor + balance_delta),
        bonus_minor: ActiveValue::Set(user.bonus_minor + bonus_delta),
        ..Default::default()
    };
    active.update(db_tx).await?;
    Ok(())
}

impl Engine {
    /// Create a transaction and apply its signed effects to the user's
    /// balances.
    pub async fn create_transaction(
        &self,
        cmd: CreateTransactionCmd,
    ) -> ResultEngine<Transaction> {
        validate_amount(cmd.amount_minor)?;
        validate_bonus_pairing(cmd.bonus_minor, cmd.bonus_kind)?;
        let title = normalize_required_name(&cmd.title, "transaction")?;
        let description = normalize_optional_text(cmd.description.as_deref());
        let currency = normalize_optional_text(cmd.currency.as_deref())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, cmd.user_id).await?;
            self.require_visible_category(&db_tx, cmd.user_id, cmd.category_id)
                .await?;

            let now = Utc::now();
            let tx = Transaction {
                id: Uuid::new_v4(),
                user_id: cmd.user_id,
                kind: cmd.kind,
                amount_minor: cmd.amount_minor,
                bonus_minor: cmd.bonus_minor,
                bonus_kind: cmd.bonus_kind,
                category_id: cmd.category_id,
                title,
                description,
                currency,
                occurred_at: cmd.occurred_at.unwrap_or(now),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            };

            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            apply_user_deltas(&db_tx, &user, tx.balance_effect(), tx.bonus_effect()).await?;
            Ok(tx)
        })
    }

    /// Rewrite an existing transaction in place.
    ///
    /// The balance delta is the new signed effect minus the old one, each
    /// computed under its own kind, so flipping income to expense moves the
    /// balance by the full swing and not just the amount difference. The
    /// bonus side follows the same rule with its own kind.
    pub async fn update_transaction(
        &self,
        cmd: UpdateTransactionCmd,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, cmd.user_id).await?;
            let model = self
                .require_owned_transaction(&db_tx, cmd.user_id, cmd.transaction_id)
                .await?;
            let old = Transaction::try_from(model)?;

            let mut updated = old.clone();
            if let Some(kind) = cmd.kind {
                updated.kind = kind;
            }
            if let Some(amount_minor) = cmd.amount_minor {
                updated.amount_minor = amount_minor;
            }
            if let Some(bonus_minor) = cmd.bonus_minor {
                updated.bonus_minor = bonus_minor;
            }
            if let Some(bonus_kind) = cmd.bonus_kind {
                updated.bonus_kind = bonus_kind;
            }
            if let Some(category_id) = cmd.category_id {
                self.require_visible_category(&db_tx, cmd.user_id, category_id)
                    .await?;
                updated.category_id = category_id;
            }
            if let Some(title) = cmd.title.as_deref() {
                updated.title = normalize_required_name(title, "transaction")?;
            }
            if let Some(description) = cmd.description.as_deref() {
                updated.description = normalize_optional_text(Some(description));
            }
            if let Some(currency) = cmd.currency.as_deref() {
                updated.currency = normalize_required_name(currency, "currency")?;
            }
            if let Some(occurred_at) = cmd.occurred_at {
                updated.occurred_at = occurred_at;
            }

            validate_amount(updated.amount_minor)?;
            validate_bonus_pairing(updated.bonus_minor, updated.bonus_kind)?;
            updated.updated_at = Utc::now();

            let balance_delta = updated.balance_effect() - old.balance_effect();
            let bonus_delta = updated.bonus_effect() - old.bonus_effect();

            transactions::ActiveModel::from(&updated)
                .update(&db_tx)
                .await?;
            apply_user_deltas(&db_tx, &user, balance_delta, bonus_delta).await?;
            Ok(updated)
        })
    }

    /// Soft-delete a transaction and revert its effects on the user's
    /// balances.
    ///
    /// The row keeps its data but stops being visible through reads, so a
    /// second delete of the same id reports not found.
    pub async fn delete_transaction(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            let model = self
                .require_owned_transaction(&db_tx, user_id, transaction_id)
                .await?;
            let tx = Transaction::try_from(model)?;

            let now = Utc::now();
            let active = transactions::ActiveModel {
                id: ActiveValue::Set(transaction_id),
                deleted_at: ActiveValue::Set(Some(now)),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            apply_user_deltas(&db_tx, &user, -tx.balance_effect(), -tx.bonus_effect()).await?;
            Ok(())
        })
    }
}
