use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use sea_orm::{
    QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};

use crate::{BonusKind, ResultEngine, Transaction, TransactionKind, transactions};

use super::super::{Engine, with_tx};

const AMOUNT_WINDOW_MIN_MINOR: i64 = 100;
const BONUS_WINDOW_MIN_MINOR: i64 = 10;

/// Filters for searching transactions. All fields are optional and combine
/// with AND; an empty filter matches every live transaction of the user.
#[derive(Clone, Debug, Default)]
pub struct TransactionSearchFilter {
    /// Case-insensitive substring match on the title.
    pub title: Option<String>,
    /// Case-insensitive substring match on the description.
    pub description: Option<String>,
    /// Matches amounts within ten percent of this value.
    pub amount_minor: Option<i64>,
    /// Matches bonus values within ten percent of this value.
    pub bonus_minor: Option<i64>,
    /// Matches transactions that occurred on this calendar day, interpreted
    /// in the offset the date carries.
    pub date: Option<DateTime<FixedOffset>>,
    pub category_id: Option<Uuid>,
    pub kind: Option<TransactionKind>,
    pub bonus_kind: Option<BonusKind>,
}

/// Inclusive `[value - w, value + w]` where `w` is ten percent of the value
/// but never below `min_minor`, so small searches still have a usable window.
fn tolerance_window(value: i64, min_minor: i64) -> (i64, i64) {
    let half = (value / 10).max(min_minor);
    (value - half, value + half)
}

/// UTC bounds `[start, end)` of the calendar day the date falls on, in the
/// offset the date carries.
fn day_window(date: DateTime<FixedOffset>) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_midnight = date.date_naive().and_time(NaiveTime::MIN);
    let offset_seconds = i64::from(date.offset().local_minus_utc());
    let start = Utc.from_utc_datetime(&local_midnight) - Duration::seconds(offset_seconds);
    (start, start + Duration::days(1))
}

impl Engine {
    /// Lists the user's live transactions, newest first.
    pub async fn list_transactions(&self, user_id: Uuid) -> ResultEngine<Vec<Transaction>> {
        self.search_transactions(user_id, &TransactionSearchFilter::default())
            .await
    }

    /// Returns a single live transaction owned by the user.
    pub async fn transaction(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_owned_transaction(&db_tx, user_id, transaction_id)
                .await?;
            Transaction::try_from(model)
        })
    }

    /// Searches the user's live transactions, newest first.
    pub async fn search_transactions(
        &self,
        user_id: Uuid,
        filter: &TransactionSearchFilter,
    ) -> ResultEngine<Vec<Transaction>> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;

            let mut query = transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id))
                .filter(transactions::Column::DeletedAt.is_null())
                .order_by_desc(transactions::Column::OccurredAt);

            if let Some(title) = filter.title.as_deref() {
                query = query.filter(
                    Expr::cust("LOWER(title)").like(format!("%{}%", title.to_lowercase())),
                );
            }
            if let Some(description) = filter.description.as_deref() {
                query = query.filter(
                    Expr::cust("LOWER(description)")
                        .like(format!("%{}%", description.to_lowercase())),
                );
            }
            if let Some(amount_minor) = filter.amount_minor {
                let (low, high) = tolerance_window(amount_minor, AMOUNT_WINDOW_MIN_MINOR);
                query = query
                    .filter(transactions::Column::AmountMinor.gte(low))
                    .filter(transactions::Column::AmountMinor.lte(high));
            }
            if let Some(bonus_minor) = filter.bonus_minor {
                let (low, high) = tolerance_window(bonus_minor, BONUS_WINDOW_MIN_MINOR);
                query = query
                    .filter(transactions::Column::BonusMinor.gte(low))
                    .filter(transactions::Column::BonusMinor.lte(high));
            }
            if let Some(date) = filter.date {
                let (start, end) = day_window(date);
                query = query
                    .filter(transactions::Column::OccurredAt.gte(start))
                    .filter(transactions::Column::OccurredAt.lt(end));
            }
            if let Some(category_id) = filter.category_id {
                query = query.filter(transactions::Column::CategoryId.eq(category_id));
            }
            if let Some(kind) = filter.kind {
                query = query.filter(transactions::Column::Kind.eq(kind.as_str()));
            }
            if let Some(bonus_kind) = filter.bonus_kind {
                query = query.filter(transactions::Column::BonusKind.eq(bonus_kind.as_str()));
            }

            let rows: Vec<transactions::Model> = query.all(&db_tx).await?;
            rows.into_iter().map(Transaction::try_from).collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_window_uses_ten_percent() {
        assert_eq!(tolerance_window(10_000, 100), (9_000, 11_000));
        assert_eq!(tolerance_window(5_000, 100), (4_500, 5_500));
    }

    #[test]
    fn tolerance_window_floors_at_minimum() {
        // 10% of 500 is 50, below the 100 floor.
        assert_eq!(tolerance_window(500, 100), (400, 600));
        assert_eq!(tolerance_window(50, 10), (40, 60));
    }

    #[test]
    fn day_window_respects_offset() {
        let date: DateTime<FixedOffset> = "2025-03-10T15:30:00+03:00"
            .parse()
            .expect("valid datetime");
        let (start, end) = day_window(date);
        assert_eq!(start.to_rfc3339(), "2025-03-09T21:00:00+00:00");
        assert_eq!(end - start, Duration::days(1));
    }

    #[test]
    fn day_window_utc_is_calendar_day() {
        let date: DateTime<FixedOffset> = "2025-03-10T00:00:00+00:00"
            .parse()
            .expect("valid datetime");
        let (start, end) = day_window(date);
        assert_eq!(start.to_rfc3339(), "2025-03-10T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-03-11T00:00:00+00:00");
    }
}
