use serde::{Deserialize, Serialize};

// -------- REQUEST DTOs --------
// Bodies are decoded strictly: unknown keys are rejected.

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SignInRequest {
    pub email: String,
    pub password: String, // Plain text
}

/// Body of `POST /sign_up` and `POST /users`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub password: String, // Plain text
}

/// Body of `POST /sign_up/checkmail`.
///
/// `email` selects the pending registration the code belongs to. It may be
/// left out while a single registration is pending.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfirmCodeRequest {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Query string of `GET /users/email`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UserByEmailQuery {
    #[serde(default)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_code_request_accepts_a_bare_code() {
        let request: ConfirmCodeRequest = serde_json::from_str(r#"{"code":"1234"}"#).unwrap();
        assert_eq!(request.code, "1234");
        assert!(request.email.is_none());
    }

    #[test]
    fn register_request_rejects_unknown_keys() {
        let result = serde_json::from_str::<RegisterRequest>(
            r#"{"email":"a@x.com","name":"A","surname":"B","password":"pw","role":"admin"}"#,
        );
        assert!(result.is_err());
    }
}
