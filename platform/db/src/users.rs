use entity::users::{ActiveModel, Column, Entity, Model};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set};
use serde::Serialize;

use crate::DbPool;

/// Public view of an account; never carries the password hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Account {
    pub user_id: i32,
    pub username: String,
}

impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Self {
            user_id: model.user_id,
            username: model.username,
        }
    }
}

/// Inserts a new account. Duplicate usernames fail on the unique constraint.
pub async fn create(
    pool: &DbPool,
    username: String,
    password_hash: String,
) -> Result<Account, DbErr> {
    let model = ActiveModel {
        username: Set(username),
        password_hash: Set(password_hash),
        ..Default::default()
    }
    .insert(pool)
    .await?;
    Ok(model.into())
}

pub async fn find_by_username(pool: &DbPool, username: &str) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(pool)
        .await
}
