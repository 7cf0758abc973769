use chrono::NaiveDate;
use entity::employees::{ActiveModel, Column, Entity, Model, Relation};
use entity::{departments, sections};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DbErr, EntityTrait, FromQueryResult, JoinType,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde::Serialize;

use crate::DbPool;

/// Row of the employee directory: the employee joined with the names of its
/// department and section.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct EmployeeListing {
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub department_name: Option<String>,
    pub section_name: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Falls back to the store's current date when absent.
    pub hire_date: Option<NaiveDate>,
    pub department_id: Option<i32>,
    pub section_id: Option<i32>,
}

/// Partial update. The outer `Option` says whether the field was supplied;
/// for nullable columns the inner `Option` is the new value.
#[derive(Clone, Debug, Default)]
pub struct EmployeeChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub hire_date: Option<Option<NaiveDate>>,
    pub department_id: Option<Option<i32>>,
    pub section_id: Option<Option<i32>>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.hire_date.is_none()
            && self.department_id.is_none()
            && self.section_id.is_none()
    }

    fn apply(self, active: &mut ActiveModel) {
        if let Some(first_name) = self.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = self.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = self.email {
            active.email = Set(email);
        }
        if let Some(phone) = self.phone {
            active.phone = Set(phone);
        }
        if let Some(hire_date) = self.hire_date {
            active.hire_date = Set(hire_date);
        }
        if let Some(department_id) = self.department_id {
            active.department_id = Set(department_id);
        }
        if let Some(section_id) = self.section_id {
            active.section_id = Set(section_id);
        }
    }
}

/// Directory listing ordered by employee id.
pub async fn list(pool: &DbPool) -> Result<Vec<EmployeeListing>, DbErr> {
    Entity::find()
        .select_only()
        .columns([
            Column::EmployeeId,
            Column::FirstName,
            Column::LastName,
            Column::Email,
            Column::Phone,
            Column::HireDate,
        ])
        .column_as(departments::Column::DepartmentName, "department_name")
        .column_as(sections::Column::SectionName, "section_name")
        .join(JoinType::LeftJoin, Relation::Department.def())
        .join(JoinType::LeftJoin, Relation::Section.def())
        .order_by_asc(Column::EmployeeId)
        .into_model::<EmployeeListing>()
        .all(pool)
        .await
}

pub async fn get(pool: &DbPool, employee_id: i32) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(employee_id).one(pool).await
}

pub async fn create(pool: &DbPool, new: NewEmployee) -> Result<Model, DbErr> {
    ActiveModel {
        employee_id: NotSet,
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        email: Set(new.email),
        phone: Set(new.phone),
        hire_date: match new.hire_date {
            Some(date) => Set(Some(date)),
            None => NotSet,
        },
        department_id: Set(new.department_id),
        section_id: Set(new.section_id),
    }
    .insert(pool)
    .await
}

/// Applies the supplied fields only. Returns `None` when no employee has the id.
pub async fn update(
    pool: &DbPool,
    employee_id: i32,
    changes: EmployeeChanges,
) -> Result<Option<Model>, DbErr> {
    let Some(current) = get(pool, employee_id).await? else {
        return Ok(None);
    };
    if changes.is_empty() {
        return Ok(Some(current));
    }
    apply_changes(pool, current, changes).await
}

/// Writes `changes` over a previously read row. A row deleted since the read
/// yields `None`, the same as an unknown id.
async fn apply_changes(
    pool: &DbPool,
    current: Model,
    changes: EmployeeChanges,
) -> Result<Option<Model>, DbErr> {
    let mut active: ActiveModel = current.into();
    changes.apply(&mut active);
    match active.update(pool).await {
        Ok(model) => Ok(Some(model)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(err) => Err(err),
    }
}

pub async fn delete(pool: &DbPool, employee_id: i32) -> Result<(), DbErr> {
    Entity::delete_by_id(employee_id).exec(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_pool;
    use crate::{departments as dept_store, sections as section_store};

    fn ada() -> NewEmployee {
        NewEmployee {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Some("ada@example.com".into()),
            phone: Some("555-0100".into()),
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..NewEmployee::default()
        }
    }

    #[tokio::test]
    async fn listing_joins_department_and_section_names() {
        let pool = memory_pool().await;
        let dept = dept_store::create(&pool, "Engineering".into()).await.unwrap();
        let section = section_store::create(&pool, "Platform".into()).await.unwrap();

        let first = create(
            &pool,
            NewEmployee {
                department_id: Some(dept.department_id),
                section_id: Some(section.section_id),
                ..ada()
            },
        )
        .await
        .unwrap();
        let second = create(
            &pool,
            NewEmployee {
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                ..NewEmployee::default()
            },
        )
        .await
        .unwrap();

        let rows = list(&pool).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].employee_id, first.employee_id);
        assert_eq!(rows[0].department_name.as_deref(), Some("Engineering"));
        assert_eq!(rows[0].section_name.as_deref(), Some("Platform"));
        assert_eq!(rows[1].employee_id, second.employee_id);
        assert_eq!(rows[1].department_name, None);
        assert_eq!(rows[1].section_name, None);
    }

    #[tokio::test]
    async fn missing_hire_date_uses_store_default() {
        let pool = memory_pool().await;
        let created = create(
            &pool,
            NewEmployee {
                hire_date: None,
                ..ada()
            },
        )
        .await
        .unwrap();
        assert!(created.hire_date.is_some());
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields() {
        let pool = memory_pool().await;
        let created = create(&pool, ada()).await.unwrap();

        let updated = update(
            &pool,
            created.employee_id,
            EmployeeChanges {
                last_name: Some("King".into()),
                phone: Some(None),
                ..EmployeeChanges::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.last_name, "King");
        assert_eq!(updated.phone, None);
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.hire_date, created.hire_date);

        let stored = get(&pool, created.employee_id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_and_get_of_unknown_id_yield_none() {
        let pool = memory_pool().await;
        let changes = EmployeeChanges {
            first_name: Some("Nobody".into()),
            ..EmployeeChanges::default()
        };
        assert!(update(&pool, 42, changes).await.unwrap().is_none());
        assert!(get(&pool, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn row_deleted_after_read_updates_to_none() {
        let pool = memory_pool().await;
        let created = create(&pool, ada()).await.unwrap();
        let stale = get(&pool, created.employee_id).await.unwrap().unwrap();
        delete(&pool, created.employee_id).await.unwrap();

        let changes = EmployeeChanges {
            first_name: Some("Augusta".into()),
            ..EmployeeChanges::default()
        };
        assert!(apply_changes(&pool, stale, changes).await.unwrap().is_none());
        assert!(get(&pool, created.employee_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let pool = memory_pool().await;
        let created = create(&pool, ada()).await.unwrap();
        delete(&pool, created.employee_id).await.unwrap();
        delete(&pool, created.employee_id).await.unwrap();
        assert!(list(&pool).await.unwrap().is_empty());
    }
}
