use chrono::Utc;
use uuid::Uuid;

use sea_orm::{
    ActiveValue, Condition, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*, sea_query::Expr,
};

use crate::{
    Category, EngineError, ResultEngine,
    categories::{self, DEFAULT_COLOR, UNCATEGORIZED_NAME},
    transactions,
};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// Category names are unique per user, case-insensitively, among the
    /// user's own categories. Global defaults do not count against the
    /// user's namespace, so a user may shadow one with their own.
    async fn ensure_category_name_free(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> ResultEngine<()> {
        let mut query = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()));
        if let Some(id) = exclude {
            query = query.filter(categories::Column::Id.ne(id));
        }
        if query.one(db_tx).await?.is_some() {
            return Err(EngineError::ExistingKey(name.to_string()));
        }
        Ok(())
    }

    /// Lists the global defaults plus the user's own categories.
    pub async fn list_categories(&self, user_id: Uuid) -> ResultEngine<Vec<Category>> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let rows: Vec<categories::Model> = categories::Entity::find()
                .filter(
                    Condition::any()
                        .add(categories::Column::UserId.is_null())
                        .add(categories::Column::UserId.eq(user_id)),
                )
                .order_by_asc(categories::Column::Name)
                .all(&db_tx)
                .await?;
            Ok(rows.into_iter().map(Category::from).collect())
        })
    }

    pub async fn create_category(
        &self,
        user_id: Uuid,
        name: &str,
        color: Option<&str>,
    ) -> ResultEngine<Category> {
        let name = normalize_required_name(name, "category")?;
        let color =
            normalize_optional_text(color).unwrap_or_else(|| DEFAULT_COLOR.to_string());
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            self.ensure_category_name_free(&db_tx, user_id, &name, None)
                .await?;

            let now = Utc::now();
            let active = categories::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                user_id: ActiveValue::Set(Some(user_id)),
                name: ActiveValue::Set(name.clone()),
                color: ActiveValue::Set(color.clone()),
                is_default: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            let inserted = active.insert(&db_tx).await?;
            Ok(Category::from(inserted))
        })
    }

    /// Renames or recolors one of the user's own categories. Global defaults
    /// cannot be edited.
    pub async fn update_category(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        name: Option<&str>,
        color: Option<&str>,
    ) -> ResultEngine<Category> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_owned_category(&db_tx, user_id, category_id)
                .await?;

            let mut active: categories::ActiveModel = model.into();
            if let Some(name) = name {
                let name = normalize_required_name(name, "category")?;
                self.ensure_category_name_free(&db_tx, user_id, &name, Some(category_id))
                    .await?;
                active.name = ActiveValue::Set(name);
            }
            if let Some(color) = color {
                let color = normalize_required_name(color, "color")?;
                active.color = ActiveValue::Set(color);
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let updated = active.update(&db_tx).await?;
            Ok(Category::from(updated))
        })
    }

    /// Deletes one of the user's own categories, moving every transaction
    /// that referenced it onto the global fallback category.
    pub async fn delete_category(&self, user_id: Uuid, category_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_owned_category(&db_tx, user_id, category_id)
                .await?;

            let fallback = categories::Entity::find()
                .filter(categories::Column::UserId.is_null())
                .filter(categories::Column::Name.eq(UNCATEGORIZED_NAME))
                .one(&db_tx)
                .await?
                .ok_or_else(|| {
                    EngineError::KeyNotFound("fallback category not exists".to_string())
                })?;

            transactions::Entity::update_many()
                .col_expr(transactions::Column::CategoryId, Expr::value(fallback.id))
                .filter(transactions::Column::UserId.eq(user_id))
                .filter(transactions::Column::CategoryId.eq(category_id))
                .exec(&db_tx)
                .await?;

            categories::Entity::delete_by_id(category_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
