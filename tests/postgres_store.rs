use anyhow::{Context, Result};
use chrono::NaiveDate;
use hr_tests::with_scratch_db;
use platform_authn::{hash_password, verify_password};
use platform_db::employees::{EmployeeChanges, NewEmployee};
use platform_db::{departments, employees, sections, users};

#[tokio::test]
async fn org_structure_and_employee_lifecycle() -> Result<()> {
    with_scratch_db(|pool| async move {
        let pool = &pool;

        let dept = departments::create(pool, "Operations".into()).await?;
        let section = sections::create(pool, "Logistics".into()).await?;
        assert!(departments::list(pool).await?.contains(&dept));
        assert!(sections::list(pool).await?.contains(&section));

        let hired = employees::create(
            pool,
            NewEmployee {
                first_name: "Katherine".into(),
                last_name: "Johnson".into(),
                email: Some("kj@example.com".into()),
                department_id: Some(dept.department_id),
                section_id: Some(section.section_id),
                ..NewEmployee::default()
            },
        )
        .await?;
        assert!(hired.hire_date.is_some(), "store default applies");

        let listing = employees::list(pool).await?;
        let row = listing
            .iter()
            .find(|row| row.employee_id == hired.employee_id)
            .context("created employee missing from listing")?;
        assert_eq!(row.department_name.as_deref(), Some("Operations"));
        assert_eq!(row.section_name.as_deref(), Some("Logistics"));

        let updated = employees::update(
            pool,
            hired.employee_id,
            EmployeeChanges {
                hire_date: Some(NaiveDate::from_ymd_opt(2020, 1, 6)),
                section_id: Some(None),
                ..EmployeeChanges::default()
            },
        )
        .await?
        .context("employee vanished")?;
        assert_eq!(updated.hire_date, NaiveDate::from_ymd_opt(2020, 1, 6));
        assert_eq!(updated.section_id, None);
        assert_eq!(updated.first_name, "Katherine");
        assert_eq!(updated.department_id, Some(dept.department_id));

        departments::delete(pool, dept.department_id).await?;
        let orphaned = employees::get(pool, hired.employee_id)
            .await?
            .context("employee removed with department")?;
        assert_eq!(orphaned.department_id, None);

        employees::delete(pool, hired.employee_id).await?;
        employees::delete(pool, hired.employee_id).await?;
        assert!(employees::get(pool, hired.employee_id).await?.is_none());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn accounts_store_hashes_and_enforce_unique_names() -> Result<()> {
    with_scratch_db(|pool| async move {
        let pool = &pool;

        let account = users::create(pool, "dorothy".into(), hash_password("vaughan")?).await?;
        let stored = users::find_by_username(pool, "dorothy")
            .await?
            .context("account missing")?;
        assert_eq!(stored.user_id, account.user_id);
        assert!(verify_password("vaughan", &stored.password_hash)?);

        assert!(
            users::create(pool, "dorothy".into(), "x".into())
                .await
                .is_err()
        );

        Ok(())
    })
    .await
}
