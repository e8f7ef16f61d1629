use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: i32,
    pub db_url: String,
    pub admin_key: String,
    pub password: PasswordConfig
}

/// Knobs for the default password validators.
#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub min_length: usize,
    pub max_similarity: f64,
    /// Replaces the embedded common-password list; `.gz` files are decompressed.
    pub common_list_path: Option<PathBuf>
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { min_length: 8, max_similarity: 0.7, common_list_path: None }
    }
}

fn get_env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_length: get_env_or("PASSWORD_MIN_LENGTH", defaults.min_length),
            max_similarity: get_env_or("PASSWORD_MAX_SIMILARITY", defaults.max_similarity),
            common_list_path: env::var_os("PASSWORD_COMMON_LIST").map(PathBuf::from),
        }
    }
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let db_url: String = Self::get_env("POSTGRES_URI");

        EnvConfig {
            port: get_env_or("PORT", 8080),
            db_url,
            admin_key: Self::get_env("ADMIN_KEY"),
            password: PasswordConfig::from_env()
        }
    }
}

pub static CONFIG: OnceLock<EnvConfig> = OnceLock::new();

pub fn config() -> &'static EnvConfig {
    CONFIG.get().expect("Not initialized")
}
