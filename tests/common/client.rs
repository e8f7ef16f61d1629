use actix_web::{web, App};
use std::sync::Arc;
use account_app::{
    admin::AdminSite,
    auth::password_validation::PasswordPolicy,
    db::postgres_service::PostgresService,
    types::{error::AppError, user::UserExtra},
};

use super::test_data::{birthday, STRONG_PASSWORD};
use super::TEST_ADMIN_KEY;

pub struct TestClient {
    pub db: Arc<PostgresService>,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        TestClient { db }
    }

    #[allow(dead_code)]
    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(PasswordPolicy::default()))
            .app_data(web::Data::new(AdminSite::default()))
            .configure(account_app::routes::configure_routes)
    }

    #[allow(dead_code)]
    pub fn admin_header(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", TEST_ADMIN_KEY))
    }

    #[allow(dead_code)]
    pub async fn create_test_user(&self, email: &str, extra: UserExtra) -> Result<entity::user::Model, AppError> {
        self.db
            .create_user(email, birthday(), Some(STRONG_PASSWORD), extra)
            .await
    }
}
