use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;
use account_app::config::{EnvConfig, PasswordConfig};
use account_app::db::postgres_service::PostgresService;

pub mod client;

pub const TEST_ADMIN_KEY: &str = "test_admin_key";

pub struct TestContext {
    pub db: Arc<PostgresService>,
    pub _container: ContainerAsync<Postgres>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        // Initialize config for tests
        let _ = account_app::config::CONFIG.set(get_test_config());

        let postgres = Postgres::default();
        let container = postgres.start().await.expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container.get_host_port_ipv4(5432).await.expect("Failed to get port");

        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Arc::new(
            PostgresService::new(&db_url)
                .await
                .expect("Failed to initialize PostgresService")
        );

        TestContext {
            db,
            _container: container,
        }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "test".to_string(), // Not used in tests
        admin_key: TEST_ADMIN_KEY.to_string(),
        password: PasswordConfig::default(),
    }
}

// Test data helpers
pub mod test_data {
    use account_app::forms::creation::UserCreationForm;
    use account_app::forms::ProfileFields;
    use chrono::NaiveDate;

    pub const STRONG_PASSWORD: &str = "quartz-Meadow-Falcon-19";

    pub fn birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(1991, 3, 14).unwrap()
    }

    pub fn creation_form(email: &str) -> UserCreationForm {
        UserCreationForm {
            profile: ProfileFields {
                email: email.to_string(),
                date_of_birth: "1991-03-14".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                nickname: "Countess".to_string(),
                username: "ada".to_string(),
                phone_number: Some("+44 20 7946".to_string()),
            },
            password1: STRONG_PASSWORD.to_string(),
            password2: STRONG_PASSWORD.to_string(),
        }
    }
}
