use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::admin::Fieldset;
use crate::auth::hasher::{safe_summary, SummaryItem};
use crate::db::postgres_service::PostgresService;
use crate::forms::{ProfileFields, DUPLICATE_EMAIL};
use crate::types::{error::AppError, form::FormErrors, user::{DBUserUpdate, UserRes}};

pub const PASSWORD_HELP_TEXT: &str = "Raw passwords are not stored, so there is no way to see \
this user's password, but you can change the password using this form.";
pub const PASSWORD_CHANGE_URL: &str = "../password/";

/// Edit form. `password` is display-only; whatever is submitted is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChangeForm {
    #[serde(flatten)]
    pub profile: ProfileFields,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// What the change page shows in place of a password input.
#[derive(Debug, Clone, Serialize)]
pub struct ReadOnlyPasswordHash {
    pub summary: Vec<SummaryItem>,
    pub help_text: String,
    pub change_password_url: String,
}

impl ReadOnlyPasswordHash {
    pub fn for_user(user: &entity::user::Model) -> Self {
        Self {
            summary: safe_summary(&user.password),
            help_text: PASSWORD_HELP_TEXT.to_string(),
            change_password_url: PASSWORD_CHANGE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeFormView {
    pub object_repr: String,
    pub user: UserRes,
    pub initial: UserChangeForm,
    pub password: ReadOnlyPasswordHash,
    pub fieldsets: Vec<Fieldset>,
}

impl UserChangeForm {
    pub fn initial(user: &entity::user::Model) -> Self {
        Self {
            profile: ProfileFields {
                email: user.email.clone(),
                date_of_birth: user.date_of_birth.format("%Y-%m-%d").to_string(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                nickname: user.nickname.clone(),
                username: user.username.clone(),
                phone_number: user.phone_number.clone(),
            },
            password: None,
            is_active: user.is_active,
            is_admin: user.is_admin,
        }
    }

    pub fn view(user: entity::user::Model, fieldsets: Vec<Fieldset>) -> ChangeFormView {
        ChangeFormView {
            object_repr: user.to_string(),
            initial: Self::initial(&user),
            password: ReadOnlyPasswordHash::for_user(&user),
            user: user.into(),
            fieldsets,
        }
    }

    pub fn clean(&self) -> Result<DBUserUpdate, FormErrors> {
        let mut errors = FormErrors::new();
        match self.profile.clean(&mut errors) {
            Some(p) if errors.is_empty() => Ok(DBUserUpdate {
                email: p.email,
                date_of_birth: p.date_of_birth,
                first_name: p.first_name,
                last_name: p.last_name,
                nickname: p.nickname,
                username: p.username,
                phone_number: p.phone_number,
                is_active: self.is_active,
                is_admin: self.is_admin,
            }),
            _ => Err(errors),
        }
    }

    pub async fn save(&self, db: &PostgresService, user_id: Uuid) -> Result<entity::user::Model, AppError> {
        let changes = self.clean()?;
        match db.update_user(user_id, changes).await {
            Err(AppError::AlreadyExists) => Err(FormErrors::single("email", DUPLICATE_EMAIL).into()),
            other => other,
        }
    }
}
