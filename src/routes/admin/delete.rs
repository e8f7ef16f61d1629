use std::sync::Arc;

use actix_web::{post, web};
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};

#[post("/{id}/delete")]
async fn delete(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
) -> ApiResult<()> {
    db.delete_user(path.into_inner()).await?;
    Ok(ApiResponse::NoContent)
}
