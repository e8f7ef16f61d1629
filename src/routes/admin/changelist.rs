use std::sync::Arc;

use actix_web::{get, web};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::admin::AdminSite;
use crate::db::postgres_service::PostgresService;
use crate::routes::admin::user_admin;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{UserListQuery, UserRes};

#[derive(Serialize)]
pub struct ChangelistRes {
    pub columns: Vec<String>,
    pub list_filter: Vec<String>,
    pub search_fields: Vec<String>,
    pub results: Vec<Map<String, Value>>,
    pub count: u64,
    pub page: u64,
    pub num_pages: u64,
}

#[get("")]
async fn changelist(
    db: web::Data<Arc<PostgresService>>,
    site: web::Data<AdminSite>,
    query: web::Query<UserListQuery>,
) -> ApiResult<ChangelistRes> {
    let admin = user_admin(&site)?;
    let page = db.list_users(&query, admin.list_per_page).await?;

    let results = page
        .results
        .into_iter()
        .map(|user| admin.list_row(&UserRes::from(user)))
        .collect();

    Ok(ApiResponse::Ok(ChangelistRes {
        columns: admin.list_display.clone(),
        list_filter: admin.list_filter.clone(),
        search_fields: admin.search_fields.clone(),
        results,
        count: page.count,
        page: page.page,
        num_pages: page.num_pages,
    }))
}
