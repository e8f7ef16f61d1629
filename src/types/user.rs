use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional fields accepted by the manager; `None` means "use the default".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserExtra {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

/// Row ready for insertion; `password` is already encoded.
#[derive(Debug, Clone)]
pub struct DBUserCreate {
    pub email: String,
    pub password: String,
    pub date_of_birth: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub username: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
}

#[derive(Debug, Clone)]
pub struct DBUserUpdate {
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub username: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
}

/// Changelist query string: `?q=jane&is_admin=true&p=2`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub q: Option<String>,
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
    pub p: Option<u64>,
}

#[derive(Debug)]
pub struct UserPage {
    pub results: Vec<entity::user::Model>,
    pub count: u64,
    pub page: u64,
    pub num_pages: u64,
}

/// The user as the admin API shows it; never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserRes {
    pub id: Uuid,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub username: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub is_staff: bool,
    pub has_usable_password: bool,
}

impl From<entity::user::Model> for UserRes {
    fn from(user: entity::user::Model) -> Self {
        Self {
            is_staff: user.is_staff(),
            has_usable_password: user.has_usable_password(),
            id: user.id,
            email: user.email,
            date_of_birth: user.date_of_birth,
            first_name: user.first_name,
            last_name: user.last_name,
            nickname: user.nickname,
            username: user.username,
            phone_number: user.phone_number,
            is_active: user.is_active,
            is_admin: user.is_admin,
        }
    }
}
