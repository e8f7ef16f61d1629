use serde::{Deserialize, Serialize};

use crate::auth::password_validation::PasswordPolicy;
use crate::db::postgres_service::PostgresService;
use crate::forms::{CleanedProfile, ProfileFields, DUPLICATE_EMAIL, REQUIRED};
use crate::types::{error::AppError, form::FormErrors, user::UserExtra};

/// Add-user form: profile plus a password typed twice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCreationForm {
    #[serde(flatten)]
    pub profile: ProfileFields,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

#[derive(Debug, Clone)]
pub struct CleanedCreation {
    pub profile: CleanedProfile,
    pub password: String,
}

impl UserCreationForm {
    fn clean_password1(&self, policy: &PasswordPolicy, errors: &mut FormErrors) -> Option<String> {
        if self.password1.is_empty() {
            errors.add("password1", "Password cannot be empty.");
            return None;
        }
        // no saved user yet, so there is nothing to compare similarity against
        let failures = policy.validate_password(&self.password1, None);
        if !failures.is_empty() {
            for message in failures {
                errors.add("password1", message);
            }
            return None;
        }
        Some(self.password1.clone())
    }

    pub fn clean(&self, policy: &PasswordPolicy) -> Result<CleanedCreation, FormErrors> {
        let mut errors = FormErrors::new();
        let profile = self.profile.clean(&mut errors);
        let password1 = self.clean_password1(policy, &mut errors);
        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        }

        // only compared once password1 survived its own checks
        if let Some(password1) = &password1 {
            if !self.password2.is_empty() && *password1 != self.password2 {
                errors.add_non_field("Passwords do not match.");
            }
        }

        match (profile, password1) {
            (Some(profile), Some(password)) if errors.is_empty() => Ok(CleanedCreation { profile, password }),
            _ => Err(errors),
        }
    }

    /// Validate, then create the user with the hashed `password1`.
    pub async fn save(
        &self,
        db: &PostgresService,
        policy: &PasswordPolicy,
    ) -> Result<entity::user::Model, AppError> {
        let cleaned = self.clean(policy)?;
        let profile = cleaned.profile;
        let extra = UserExtra {
            first_name: Some(profile.first_name),
            last_name: Some(profile.last_name),
            nickname: Some(profile.nickname),
            username: Some(profile.username),
            phone_number: profile.phone_number,
            is_active: Some(true),
            is_admin: Some(false),
        };

        match db
            .create_user(&profile.email, profile.date_of_birth, Some(&cleaned.password), extra)
            .await
        {
            Err(AppError::AlreadyExists) => Err(FormErrors::single("email", DUPLICATE_EMAIL).into()),
            other => other,
        }
    }
}
