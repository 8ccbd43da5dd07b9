use async_trait::async_trait;
use diesel::prelude::*;

use super::AppealStore;
use crate::db::connection::Database;
use crate::db::error::RepositoryError;
use crate::db::models::{Appeal, NewAppeal};
use crate::db::schema::appeal;

pub struct PgAppealStore {
    db: Database,
}

impl PgAppealStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppealStore for PgAppealStore {
    async fn create(&self, new_appeal: NewAppeal) -> Result<Appeal, RepositoryError> {
        self.db
            .run(move |conn| {
                diesel::insert_into(appeal::table)
                    .values(&new_appeal)
                    .returning(Appeal::as_returning())
                    .get_result(conn)
                    .map_err(Into::into)
            })
            .await
    }
}
