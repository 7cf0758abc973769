use entity::departments::{ActiveModel, Entity, Model};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set};

use crate::DbPool;

pub async fn list(pool: &DbPool) -> Result<Vec<Model>, DbErr> {
    Entity::find().all(pool).await
}

pub async fn create(pool: &DbPool, department_name: String) -> Result<Model, DbErr> {
    ActiveModel {
        department_name: Set(department_name),
        ..Default::default()
    }
    .insert(pool)
    .await
}

/// Deletes by id; a missing row is not an error.
pub async fn delete(pool: &DbPool, department_id: i32) -> Result<(), DbErr> {
    Entity::delete_by_id(department_id).exec(pool).await?;
    Ok(())
}
