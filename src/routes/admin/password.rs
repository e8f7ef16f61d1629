use std::sync::Arc;

use actix_web::{get, post, web};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::password_validation::PasswordPolicy;
use crate::db::postgres_service::PostgresService;
use crate::forms::password::AdminPasswordChangeForm;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize)]
pub struct PasswordFormRes {
    pub object_repr: String,
    pub fields: Vec<String>,
    pub password_help_texts: Vec<String>,
}

#[derive(Serialize)]
pub struct PasswordChangedRes {
    pub message: String,
}

#[get("/{id}/password")]
async fn password_form(
    db: web::Data<Arc<PostgresService>>,
    policy: web::Data<PasswordPolicy>,
    path: web::Path<Uuid>,
) -> ApiResult<PasswordFormRes> {
    let user = db.get_user_by_id(&path.into_inner()).await?;
    Ok(ApiResponse::Ok(PasswordFormRes {
        object_repr: user.to_string(),
        fields: vec!["password1".to_string(), "password2".to_string()],
        password_help_texts: policy.help_texts(),
    }))
}

#[post("/{id}/password")]
async fn password(
    db: web::Data<Arc<PostgresService>>,
    policy: web::Data<PasswordPolicy>,
    path: web::Path<Uuid>,
    body: web::Json<AdminPasswordChangeForm>,
) -> ApiResult<PasswordChangedRes> {
    let user = db.get_user_by_id(&path.into_inner()).await?;
    body.save(&db, &policy, &user).await?;
    Ok(ApiResponse::Ok(PasswordChangedRes {
        message: "Password changed successfully.".to_string(),
    }))
}
