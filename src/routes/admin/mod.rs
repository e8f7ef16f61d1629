use crate::admin::{AdminSite, ModelAdmin};
use crate::types::error::AppError;

pub mod add;
pub mod change;
pub mod changelist;
pub mod delete;
pub mod index;
pub mod password;

pub(crate) fn user_admin(site: &AdminSite) -> Result<&ModelAdmin, AppError> {
    site.get("user").ok_or(AppError::NotFound)
}
