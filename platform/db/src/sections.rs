use entity::sections::{ActiveModel, Entity, Model};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set};

use crate::DbPool;

pub async fn list(pool: &DbPool) -> Result<Vec<Model>, DbErr> {
    Entity::find().all(pool).await
}

pub async fn create(pool: &DbPool, section_name: String) -> Result<Model, DbErr> {
    ActiveModel {
        section_name: Set(section_name),
        ..Default::default()
    }
    .insert(pool)
    .await
}

pub async fn delete(pool: &DbPool, section_id: i32) -> Result<(), DbErr> {
    Entity::delete_by_id(section_id).exec(pool).await?;
    Ok(())
}
