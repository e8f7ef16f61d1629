use crate::utils::webutils::validate_admin_token;
use actix_web::web;

pub mod admin;
pub mod health;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let admin_auth = actix_web_httpauth::middleware::HttpAuthentication::bearer(validate_admin_token);

    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(
        web::scope("/admin")
            .wrap(admin_auth)
            .service(admin::index::index)
            .service(
                web::scope("/user")
                    .service(admin::changelist::changelist)
                    .service(admin::add::add_form)
                    .service(admin::add::add)
                    .service(admin::change::change_form)
                    .service(admin::change::change)
                    .service(admin::password::password_form)
                    .service(admin::password::password)
                    .service(admin::delete::delete)
            )
    );
}
