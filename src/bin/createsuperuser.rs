use account_app::auth::password_validation::PasswordPolicy;
use account_app::config::PasswordConfig;
use account_app::db::postgres_service::PostgresService;
use account_app::forms::{CleanedProfile, ProfileFields};
use account_app::types::form::FormErrors;
use account_app::types::user::UserExtra;
use clap::Parser;
use tracing::{info, warn};

/// Create an admin account from the command line.
#[derive(Parser, Debug)]
#[command(name = "createsuperuser", version)]
struct Args {
    #[arg(long, env = "POSTGRES_URI", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    email: String,

    /// YYYY-MM-DD
    #[arg(long)]
    date_of_birth: String,

    /// Omit to create the account with an unusable password.
    #[arg(long, env = "ACCOUNT_SUPERUSER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    nickname: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    phone_number: Option<String>,

    /// Store the password even if it fails the password policy.
    #[arg(long)]
    skip_validation: bool,
}

impl Args {
    fn profile(&self) -> ProfileFields {
        ProfileFields {
            email: self.email.clone(),
            date_of_birth: self.date_of_birth.clone(),
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            nickname: self.nickname.clone().unwrap_or_default(),
            username: self.username.clone().unwrap_or_default(),
            phone_number: self.phone_number.clone(),
        }
    }

    /// Field checks of the add form, plus the password policy unless skipped.
    fn clean(&self, policy: &PasswordPolicy) -> Result<CleanedProfile, FormErrors> {
        let profile = self.profile();
        let mut errors = FormErrors::new();
        let cleaned = profile.clean(&mut errors);

        if let (Some(password), false) = (&self.password, self.skip_validation) {
            let attributes = profile.attributes();
            for message in policy.validate_password(password, Some(&attributes)) {
                errors.add("password", message);
            }
        }

        match cleaned {
            Some(cleaned) if errors.is_empty() => Ok(cleaned),
            _ => Err(errors),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let policy = PasswordPolicy::from_config(&PasswordConfig::from_env())?;
    let profile = args.clean(&policy).map_err(|errors| format!("invalid input: {errors}"))?;
    if args.password.is_none() {
        warn!("no password given, the account will have an unusable password");
    }

    let db = PostgresService::new(&args.database_url).await?;
    let user = db
        .create_superuser(
            &profile.email,
            profile.date_of_birth,
            args.password.as_deref(),
            UserExtra {
                first_name: Some(profile.first_name),
                last_name: Some(profile.last_name),
                nickname: Some(profile.nickname),
                username: Some(profile.username),
                phone_number: profile.phone_number,
                ..Default::default()
            },
        )
        .await?;

    info!("superuser {} created", user.id);
    println!("Superuser created successfully: {}", user);
    Ok(())
}
