use serde::{Deserialize, Serialize};

use crate::auth::hasher::make_password;
use crate::auth::password_validation::{PasswordPolicy, UserAttributes};
use crate::db::postgres_service::PostgresService;
use crate::forms::REQUIRED;
use crate::types::{error::AppError, form::FormErrors};

pub const MISMATCH: &str = "The two password fields didn't match.";

/// Admin-side password reset for an existing user; no old password needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminPasswordChangeForm {
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl AdminPasswordChangeForm {
    pub fn clean(&self, policy: &PasswordPolicy, user: &entity::user::Model) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        if self.password1.is_empty() {
            errors.add("password1", REQUIRED);
        }
        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        if self.password1 != self.password2 {
            return Err(FormErrors::single("password2", MISMATCH));
        }
        let attributes = UserAttributes::from(user);
        for message in policy.validate_password(&self.password2, Some(&attributes)) {
            errors.add("password2", message);
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(self.password1.clone())
    }

    pub async fn save(
        &self,
        db: &PostgresService,
        policy: &PasswordPolicy,
        user: &entity::user::Model,
    ) -> Result<(), AppError> {
        let password = self.clean(policy, user)?;
        let encoded = make_password(&password).map_err(|e| AppError::Internal(e.to_string()))?;
        db.set_user_password(user.id, encoded).await
    }
}
