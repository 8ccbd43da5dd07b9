//! In-memory stores backing the router tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::db::error::RepositoryError;
use crate::db::models::{Appeal, NewAppeal, NewUser, User};
use crate::db::repositories::{AppealStore, UserStore};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(RepositoryError::UniqueViolation(format!(
                "email {} is already in use",
                new_user.email
            )));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: new_user.email,
            name: new_user.name,
            surname: new_user.surname,
            password: new_user.password,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("user with email {email} not found")))
    }

    async fn find_by_id(&self, id: i64) -> Result<User, RepositoryError> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("user with id {id} not found")))
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(RepositoryError::NotFound(format!("user with id {id} not found")));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAppealStore {
    appeals: Mutex<Vec<Appeal>>,
}

impl InMemoryAppealStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Appeal> {
        self.appeals.lock().unwrap().clone()
    }
}

#[async_trait]
impl AppealStore for InMemoryAppealStore {
    async fn create(&self, new_appeal: NewAppeal) -> Result<Appeal, RepositoryError> {
        let mut appeals = self.appeals.lock().unwrap();
        let appeal = Appeal {
            id: appeals.len() as i64 + 1,
            email: new_appeal.email,
            phone_number: new_appeal.phone_number,
            nickname: new_appeal.nickname,
            subject: new_appeal.subject,
            message: new_appeal.message,
            document: new_appeal.document,
        };
        appeals.push(appeal.clone());
        Ok(appeal)
    }
}
