use std::sync::Arc;

use actix_web::{get, post, web};
use serde::Serialize;

use crate::admin::{AdminSite, Fieldset};
use crate::auth::password_validation::PasswordPolicy;
use crate::db::postgres_service::PostgresService;
use crate::forms::creation::UserCreationForm;
use crate::routes::admin::user_admin;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserRes;

#[derive(Serialize)]
pub struct AddFormRes {
    pub fieldsets: Vec<Fieldset>,
    pub password_help_texts: Vec<String>,
}

#[get("/add")]
async fn add_form(
    site: web::Data<AdminSite>,
    policy: web::Data<PasswordPolicy>,
) -> ApiResult<AddFormRes> {
    let admin = user_admin(&site)?;
    Ok(ApiResponse::Ok(AddFormRes {
        fieldsets: admin.add_fieldsets.clone(),
        password_help_texts: policy.help_texts(),
    }))
}

#[post("/add")]
async fn add(
    db: web::Data<Arc<PostgresService>>,
    policy: web::Data<PasswordPolicy>,
    body: web::Json<UserCreationForm>,
) -> ApiResult<UserRes> {
    let user = body.save(&db, &policy).await?;
    Ok(ApiResponse::Created {
        location: format!("/admin/user/{}/change", user.id),
        body: user.into(),
    })
}
