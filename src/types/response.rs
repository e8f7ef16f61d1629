use serde::Serialize;
use crate::types::error::AppError;
use actix_web::{http::header, HttpResponse, Responder};

pub enum ApiResponse<T> {
    Ok(T),
    /// 201 with a `Location` pointing at the new object.
    Created { location: String, body: T },
    NoContent,
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = actix_web::body::BoxBody;
    fn respond_to(self, _: &actix_web::HttpRequest) -> HttpResponse {
        match self {
            ApiResponse::Ok(v) => HttpResponse::Ok().json(v),
            ApiResponse::Created { location, body } => HttpResponse::Created()
                .insert_header((header::LOCATION, location))
                .json(body),
            ApiResponse::NoContent => HttpResponse::NoContent().finish(),
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;
