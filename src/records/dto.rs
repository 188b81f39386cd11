use serde::{Deserialize, Serialize};
use time::{format_description::FormatItem, macros::format_description, PrimitiveDateTime};

use crate::records::repo_types::UserRecord;

/// Body of `POST /add_user` and `POST /add_user_form`. Every field is
/// optional here so absence is reported as invalid input, not a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct AddUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl AddUserRequest {
    /// True when none of the three fields was sent.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserItem {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
}

impl From<UserRecord> for UserItem {
    fn from(r: UserRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            phone: r.phone,
            created_at: display_timestamp(r.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserItem>,
}

const WHOLE_SECONDS: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const WITH_MICROS: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");

/// `YYYY-MM-DD HH:MM:SS`, with `.ffffff` only when there are microseconds.
fn display_timestamp(ts: PrimitiveDateTime) -> String {
    let format = if ts.microsecond() == 0 {
        WHOLE_SECONDS
    } else {
        WITH_MICROS
    };
    ts.format(format).unwrap_or_else(|_| ts.to_string())
}
