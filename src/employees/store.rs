use sqlx::SqlitePool;
use uuid::Uuid;

use super::Employee;

pub async fn find_all(db_pool: &SqlitePool) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT id,name,email,department,role,password FROM employees ORDER BY name ASC")
        .fetch_all(db_pool)
        .await
}

pub async fn find_by_id(db_pool: &SqlitePool, id: Uuid) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT id,name,email,department,role,password FROM employees WHERE id=?")
        .bind(id.to_string())
        .fetch_optional(db_pool)
        .await
}

pub async fn find_by_email(db_pool: &SqlitePool, email: &str) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT id,name,email,department,role,password FROM employees WHERE email=?")
        .bind(email)
        .fetch_optional(db_pool)
        .await
}

/// Inserts with a fresh id. A second row with the same email fails on the
/// unique constraint.
pub async fn insert(
    db_pool: &SqlitePool,
    name: &str,
    email: &str,
    department: &str,
    role: &str,
    password_hash: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO employees (id,name,email,department,role,password) VALUES (?,?,?,?,?,?)")
        .bind(id.to_string())
        .bind(name)
        .bind(email)
        .bind(department)
        .bind(role)
        .bind(password_hash)
        .execute(db_pool)
        .await?;
    Ok(id)
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|err| err.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn employees_come_back_sorted_by_name() {
        let pool = db::memory().await.unwrap();
        insert(&pool, "Zed", "zed@corp.io", "Ops", "SRE", "h").await.unwrap();
        insert(&pool, "Amy", "amy@corp.io", "Eng", "Lead", "h").await.unwrap();

        let names: Vec<String> = find_all(&pool).await.unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Amy", "Zed"]);
    }

    #[tokio::test]
    async fn duplicate_email_hits_the_unique_constraint() {
        let pool = db::memory().await.unwrap();
        insert(&pool, "Amy", "amy@corp.io", "Eng", "Lead", "h").await.unwrap();

        let err = insert(&pool, "Amy Two", "amy@corp.io", "Eng", "IC", "h").await.unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn lookup_by_unknown_id_is_none() {
        let pool = db::memory().await.unwrap();
        assert!(find_by_id(&pool, Uuid::now_v7()).await.unwrap().is_none());
    }
}
