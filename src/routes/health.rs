use std::sync::Arc;

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: String
}

#[get("")]
async fn health(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<Response> {
    db.ping().await.map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(ApiResponse::Ok(Response { status: "ok".to_string() }))
}
