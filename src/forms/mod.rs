//! Admin forms: raw submissions in, cleaned values or field errors out.

pub mod change;
pub mod creation;
pub mod password;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password_validation::UserAttributes;
use crate::types::form::FormErrors;

pub const REQUIRED: &str = "This field is required.";
pub const DUPLICATE_EMAIL: &str = "User with this Email already exists.";

/// Profile fields shared by the add and change forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileFields {
    #[serde(default)]
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 255, message = "Ensure this value has at most 255 characters.")
    )]
    pub email: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(length(max = 30, message = "Ensure this value has at most 30 characters."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 30, message = "Ensure this value has at most 30 characters."))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 30, message = "Ensure this value has at most 30 characters."))]
    pub nickname: String,
    #[serde(default)]
    #[validate(length(max = 20, message = "Ensure this value has at most 20 characters."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(max = 15, message = "Ensure this value has at most 15 characters."))]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedProfile {
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub username: String,
    pub phone_number: Option<String>,
}

impl ProfileFields {
    /// Validate into `errors`; `None` if any profile field failed.
    pub fn clean(&self, errors: &mut FormErrors) -> Option<CleanedProfile> {
        let before = errors.clone();
        let email = self.email.trim().to_string();
        if email.is_empty() {
            errors.add("email", REQUIRED);
        }

        let date_of_birth = match self.date_of_birth.trim() {
            "" => {
                errors.add("date_of_birth", REQUIRED);
                None
            }
            // the column type stores years 1..=9999 only
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) if (1..=9999).contains(&date.year()) => Some(date),
                _ => {
                    errors.add("date_of_birth", "Enter a valid date.");
                    None
                }
            },
        };

        let trimmed = ProfileFields {
            email: email.clone(),
            date_of_birth: self.date_of_birth.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            nickname: self.nickname.trim().to_string(),
            username: self.username.trim().to_string(),
            phone_number: self
                .phone_number
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        };
        if let Err(e) = trimmed.validate() {
            errors.extend_from_validator(&e);
        }

        if *errors != before {
            return None;
        }
        Some(CleanedProfile {
            email,
            date_of_birth: date_of_birth?,
            first_name: trimmed.first_name,
            last_name: trimmed.last_name,
            nickname: trimmed.nickname,
            username: trimmed.username,
            phone_number: trimmed.phone_number,
        })
    }

    /// Attribute values for the similarity check, as typed.
    pub fn attributes(&self) -> UserAttributes {
        UserAttributes {
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}
