use actix_web::{dev::ServiceRequest, error::ErrorUnauthorized};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use tracing::warn;

use crate::config::config;

/// Bearer guard for `/admin`: the token must equal `ADMIN_KEY`.
pub async fn validate_admin_token(req: ServiceRequest, credentials: BearerAuth) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    if credentials.token() == config().admin_key {
        Ok(req)
    } else {
        warn!("rejected admin request to {}", req.path());
        Err((ErrorUnauthorized("Invalid token"), req))
    }
}
