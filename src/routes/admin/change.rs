use std::sync::Arc;

use actix_web::{get, post, web};
use uuid::Uuid;

use crate::admin::AdminSite;
use crate::db::postgres_service::PostgresService;
use crate::forms::change::{ChangeFormView, UserChangeForm};
use crate::routes::admin::user_admin;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserRes;

#[get("/{id}/change")]
async fn change_form(
    db: web::Data<Arc<PostgresService>>,
    site: web::Data<AdminSite>,
    path: web::Path<Uuid>,
) -> ApiResult<ChangeFormView> {
    let admin = user_admin(&site)?;
    let user = db.get_user_by_id(&path.into_inner()).await?;
    Ok(ApiResponse::Ok(UserChangeForm::view(user, admin.fieldsets.clone())))
}

#[post("/{id}/change")]
async fn change(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    body: web::Json<UserChangeForm>,
) -> ApiResult<UserRes> {
    let user = body.save(&db, path.into_inner()).await?;
    Ok(ApiResponse::Ok(user.into()))
}
