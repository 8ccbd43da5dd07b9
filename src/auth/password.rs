use bcrypt::{DEFAULT_COST, hash, verify};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(#[from] bcrypt::BcryptError),
    #[error("Hashing task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

pub struct PasswordManager;

impl PasswordManager {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        Ok(hash(password, DEFAULT_COST)?)
    }

    /// `false` on mismatch and on a hash bcrypt cannot parse.
    pub fn verify(password: &str, hash: &str) -> bool {
        match verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be checked");
                false
            }
        }
    }

    /// bcrypt is deliberately slow; keep it off the async workers.
    pub async fn hash_async(password: String) -> Result<String, PasswordError> {
        tokio::task::spawn_blocking(move || Self::hash(&password)).await?
    }

    pub async fn verify_async(password: String, hash: String) -> Result<bool, PasswordError> {
        Ok(tokio::task::spawn_blocking(move || Self::verify(&password, &hash)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::PasswordManager;

    #[test]
    fn verify_returns_true_when_password_matches() {
        let password = "secure_password_@123P";
        let hashed = PasswordManager::hash(password).expect("Hashing failed");

        assert!(PasswordManager::verify(password, &hashed));
    }

    #[test]
    fn verify_returns_false_when_password_does_not_match() {
        let hashed = PasswordManager::hash("secure_password_@123P").expect("Hashing failed");

        assert!(!PasswordManager::verify("wrong_password_@123", &hashed));
    }

    #[test]
    fn same_password_hashes_differently_each_time() {
        let first = PasswordManager::hash("kitchen").unwrap();
        let second = PasswordManager::hash("kitchen").unwrap();

        assert_ne!(first, second, "Salt should make every hash unique");
        assert!(PasswordManager::verify("kitchen", &first));
        assert!(PasswordManager::verify("kitchen", &second));
    }

    #[test]
    fn verify_fails_when_case_differs() {
        let hash = PasswordManager::hash("MyPassword").unwrap();

        assert!(!PasswordManager::verify("mypassword", &hash));
    }

    #[test]
    fn malformed_hash_is_a_mismatch_not_an_error() {
        assert!(!PasswordManager::verify("anything", "not-a-bcrypt-hash"));
        assert!(!PasswordManager::verify("anything", ""));
    }

    #[tokio::test]
    async fn async_helpers_agree_with_sync_ones() {
        let hashed = PasswordManager::hash_async("living room".to_string())
            .await
            .expect("Hashing failed");

        assert!(
            PasswordManager::verify_async("living room".to_string(), hashed.clone())
                .await
                .unwrap()
        );
        assert!(
            !PasswordManager::verify_async("bedroom".to_string(), hashed)
                .await
                .unwrap()
        );
    }
}
