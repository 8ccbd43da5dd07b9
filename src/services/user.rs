use std::sync::Arc;

use shop_api::RegisterRequest;

use super::required;
use crate::auth::password::PasswordManager;
use crate::db::error::RepositoryError;
use crate::db::models::{NewUser, User};
use crate::db::repositories::UserStore;
use crate::error::AppError;

/// A registration body with every field checked.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn parse(request: RegisterRequest) -> Result<Self, AppError> {
        let email = required(&request.email, "email")?;
        if !is_valid_email(&email) {
            return Err(AppError::validation(format!("invalid email {email}")));
        }
        let name = required(&request.name, "name")?;
        let surname = required(&request.surname, "surname")?;
        required(&request.password, "password")?;

        Ok(Self {
            email,
            name,
            surname,
            password: request.password,
        })
    }
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !email.contains(' ')
        }
        None => false,
    }
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Hashes the password and inserts the user. The store's unique
    /// constraint decides duplicates.
    pub async fn create(&self, form: RegistrationForm) -> Result<User, AppError> {
        let password = PasswordManager::hash_async(form.password).await?;

        let user = self
            .store
            .create(NewUser {
                email: form.email,
                name: form.name,
                surname: form.surname,
                password,
            })
            .await?;

        tracing::info!(user_id = user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// Early answer for a taken email; `create` still enforces it.
    pub async fn ensure_email_available(&self, email: &str) -> Result<(), AppError> {
        match self.store.find_by_email(email).await {
            Ok(_) => Err(AppError::already_exists(format!(
                "email {email} is already in use"
            ))),
            Err(RepositoryError::NotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User, AppError> {
        let email = required(email, "email param")?;
        Ok(self.store.find_by_email(&email).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User, AppError> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.store.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::InMemoryUserStore;
    use axum::http::StatusCode;

    fn request(email: &str, name: &str, surname: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            name: name.to_string(),
            surname: surname.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn parse_trims_required_fields() {
        let form = RegistrationForm::parse(request(" a@x.com ", " A", "B ", "pw")).unwrap();

        assert_eq!(form.email, "a@x.com");
        assert_eq!(form.name, "A");
        assert_eq!(form.surname, "B");
    }

    #[test]
    fn parse_rejects_blank_fields() {
        let cases = [
            (request("  ", "A", "B", "pw"), "empty email"),
            (request("a@x.com", " ", "B", "pw"), "empty name"),
            (request("a@x.com", "A", "", "pw"), "empty surname"),
            (request("a@x.com", "A", "B", "   "), "empty password"),
        ];

        for (req, expected) in cases {
            let err = RegistrationForm::parse(req).unwrap_err();
            assert!(
                matches!(&err, AppError::ValidationError(msg) if msg == expected),
                "expected {expected}, got {err:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_addresses_without_at_sign() {
        assert!(RegistrationForm::parse(request("not-an-email", "A", "B", "pw")).is_err());
        assert!(RegistrationForm::parse(request("a@b@c", "A", "B", "pw")).is_err());
    }

    #[tokio::test]
    async fn create_stores_a_hash_not_the_password() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = UserService::new(store.clone());

        let user = service
            .create(RegistrationForm::parse(request("a@x.com", "A", "B", "pw")).unwrap())
            .await
            .unwrap();

        assert_ne!(user.password, "pw");
        assert!(PasswordManager::verify("pw", &user.password));
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_already_exists_and_adds_no_row() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = UserService::new(store.clone());
        let form = RegistrationForm::parse(request("a@x.com", "A", "B", "pw")).unwrap();
        service.create(form.clone()).await.unwrap();

        let err = service.create(form).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(store.count(), 1);
        assert!(service.ensure_email_available("a@x.com").await.is_err());
        assert!(service.ensure_email_available("free@x.com").await.is_ok());
    }

    #[tokio::test]
    async fn lookups_report_missing_users_as_not_found() {
        let service = UserService::new(Arc::new(InMemoryUserStore::new()));

        assert!(matches!(
            service.get_by_email("nobody@x.com").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.get_by_id(7).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(7).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            service.get_by_email("  ").await,
            Err(AppError::ValidationError(_))
        ));
    }
}
