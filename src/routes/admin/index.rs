use actix_web::{get, web};
use serde::Serialize;

use crate::admin::AdminSite;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize)]
pub struct ModelEntry {
    pub model_name: String,
    pub changelist_url: String,
    pub add_url: String,
}

#[derive(Serialize)]
pub struct IndexRes {
    pub site_header: String,
    pub models: Vec<ModelEntry>,
}

#[get("")]
async fn index(site: web::Data<AdminSite>) -> ApiResult<IndexRes> {
    let models = site
        .models
        .iter()
        .map(|m| ModelEntry {
            model_name: m.model_name.clone(),
            changelist_url: format!("/admin/{}", m.model_name),
            add_url: format!("/admin/{}/add", m.model_name),
        })
        .collect();

    Ok(ApiResponse::Ok(IndexRes { site_header: site.site_header.clone(), models }))
}
