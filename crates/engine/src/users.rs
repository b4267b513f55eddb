//! Users table and the public user view.
//!
//! The stored row carries the denormalized balance aggregate; the `User`
//! view strips credentials before anything leaves the engine.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub balance_minor: i64,
    pub bonus_minor: i64,
    pub verified: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub balance_minor: i64,
    pub bonus_minor: i64,
    pub token: Option<String>,
    pub verification_code: Option<String>,
    pub verified: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            balance_minor: model.balance_minor,
            bonus_minor: model.bonus_minor,
            verified: model.verified,
        }
    }
}
