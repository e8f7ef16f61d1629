use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking a stored password that can never verify.
pub const UNUSABLE_PASSWORD_PREFIX: &str = "!";

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,               // identity field
    #[serde(skip_serializing)]
    pub password: String,            // PHC hash or unusable marker
    pub date_of_birth: Date,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub username: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Admins are staff; there is no separate staff flag.
    pub fn is_staff(&self) -> bool {
        self.is_admin
    }

    pub fn has_perm(&self, _perm: &str) -> bool {
        true
    }

    pub fn has_module_perms(&self, _app_label: &str) -> bool {
        true
    }

    pub fn has_usable_password(&self) -> bool {
        !self.password.starts_with(UNUSABLE_PASSWORD_PREFIX)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}
