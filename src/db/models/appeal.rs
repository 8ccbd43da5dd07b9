use diesel::{Insertable, Queryable, Selectable};
use shop_api::AppealResponse;

use crate::db::schema::appeal;

/// Stored when the form leaves the subject empty.
pub const DEFAULT_SUBJECT: &str = "Feedback form";
/// Reported for appeals submitted without an attachment.
pub const NO_DOCUMENT: &str = "without a file";

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = appeal)]
pub struct NewAppeal {
    pub email: String,
    pub phone_number: String,
    pub nickname: String,
    pub subject: Option<String>,
    pub message: String,
    pub document: Option<String>,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = appeal)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Appeal {
    pub id: i64,
    pub email: String,
    pub phone_number: String,
    pub nickname: String,
    pub subject: Option<String>,
    pub message: String,
    pub document: Option<String>,
}

impl From<Appeal> for AppealResponse {
    fn from(appeal: Appeal) -> Self {
        AppealResponse {
            id: appeal.id,
            email: appeal.email,
            phone_number: appeal.phone_number,
            nickname: appeal.nickname,
            subject: appeal.subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            message: appeal.message,
            document: appeal.document.unwrap_or_else(|| NO_DOCUMENT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_fills_in_missing_subject_and_document() {
        let stored = Appeal {
            id: 3,
            email: "client@example.com".to_string(),
            phone_number: "+70000000000".to_string(),
            nickname: "client".to_string(),
            subject: None,
            message: "Please call me back".to_string(),
            document: None,
        };

        let response = AppealResponse::from(stored);

        assert_eq!(response.subject, DEFAULT_SUBJECT);
        assert_eq!(response.document, NO_DOCUMENT);
    }
}
