use async_trait::async_trait;
use diesel::prelude::*;

use super::UserStore;
use crate::db::connection::Database;
use crate::db::error::RepositoryError;
use crate::db::models::{NewUser, User};
use crate::db::schema::users;

pub struct PgUserStore {
    db: Database,
}

impl PgUserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let email = new_user.email.clone();

        self.db
            .run(move |conn| {
                diesel::insert_into(users::table)
                    .values(&new_user)
                    .returning(User::as_returning())
                    .get_result(conn)
                    .map_err(Into::into)
            })
            .await
            .map_err(|e| match e {
                RepositoryError::UniqueViolation(_) => {
                    RepositoryError::UniqueViolation(format!("email {email} is already in use"))
                }
                other => other,
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        let email = email.to_string();

        self.db
            .run(move |conn| {
                users::table
                    .filter(users::email.eq(email.as_str()))
                    .select(User::as_select())
                    .first(conn)
                    .optional()?
                    .ok_or_else(|| {
                        RepositoryError::NotFound(format!("user with email {email} not found"))
                    })
            })
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<User, RepositoryError> {
        self.db
            .run(move |conn| {
                users::table
                    .find(id)
                    .select(User::as_select())
                    .first(conn)
                    .optional()?
                    .ok_or_else(|| RepositoryError::NotFound(format!("user with id {id} not found")))
            })
            .await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.db
            .run(move |conn| {
                let deleted = diesel::delete(users::table.find(id)).execute(conn)?;
                if deleted == 0 {
                    return Err(RepositoryError::NotFound(format!(
                        "user with id {id} not found"
                    )));
                }
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::{create_pool, run_migrations};
    use std::time::Duration;
    use uuid::Uuid;

    fn test_store() -> PgUserStore {
        let dsn = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let config = crate::config::PostgresConfig {
            dsn,
            max_connections: 2,
            request_timeout_secs: 5,
            connection_timeout_secs: 5,
            shutdown_timeout_secs: 1,
        };
        let pool = create_pool(&config).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        PgUserStore::new(Database::new(pool, Duration::from_secs(5)))
    }

    fn new_user(suffix: &str) -> NewUser {
        NewUser {
            email: format!("test_{suffix}_{}@example.com", Uuid::new_v4()),
            name: "Test".to_string(),
            surname: format!("User {suffix}"),
            password: "test_hash".to_string(),
        }
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL server at DATABASE_URL"]
    async fn create_then_find_by_email_and_id() {
        let store = test_store();
        let candidate = new_user("find");

        let created = store.create(candidate.clone()).await.expect("create");
        assert!(created.id > 0);
        assert_eq!(created.email, candidate.email);

        let by_email = store.find_by_email(&candidate.email).await.expect("by email");
        assert_eq!(by_email.id, created.id);

        let by_id = store.find_by_id(created.id).await.expect("by id");
        assert_eq!(by_id.email, candidate.email);

        store.delete(created.id).await.expect("cleanup");
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL server at DATABASE_URL"]
    async fn duplicate_email_is_a_unique_violation() {
        let store = test_store();
        let candidate = new_user("duplicate");

        let created = store.create(candidate.clone()).await.expect("first create");
        let result = store.create(candidate.clone()).await;

        match result {
            Err(RepositoryError::UniqueViolation(msg)) => assert!(msg.contains(&candidate.email)),
            other => panic!("Expected UniqueViolation, got {other:?}"),
        }

        store.delete(created.id).await.expect("cleanup");
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL server at DATABASE_URL"]
    async fn missing_rows_are_not_found() {
        let store = test_store();

        assert!(matches!(
            store.find_by_email("nobody_here@example.com").await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            store.find_by_id(i64::MAX).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(i64::MAX).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
