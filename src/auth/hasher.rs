use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use entity::user::UNUSABLE_PASSWORD_PREFIX;
use rand_core::{OsRng, RngCore};
use serde::Serialize;

const UNUSABLE_PASSWORD_SUFFIX_LENGTH: usize = 40;
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MASK_SHOW: usize = 6;

/// Hash a raw password into an Argon2id PHC string.
pub fn make_password(raw: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(raw.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// A marker that no raw password will ever check against.
pub fn make_unusable_password() -> String {
    let mut rng = OsRng;
    let mut out = String::from(UNUSABLE_PASSWORD_PREFIX);
    let mut buf = [0u8; 64];
    while out.len() < UNUSABLE_PASSWORD_PREFIX.len() + UNUSABLE_PASSWORD_SUFFIX_LENGTH {
        rng.fill_bytes(&mut buf);
        // 248 = 62 * 4, rejects the tail that would skew the distribution
        for b in buf.iter().filter(|b| **b < 248) {
            if out.len() == UNUSABLE_PASSWORD_PREFIX.len() + UNUSABLE_PASSWORD_SUFFIX_LENGTH {
                break;
            }
            out.push(ALPHANUMERIC[(*b as usize) % ALPHANUMERIC.len()] as char);
        }
    }
    out
}

pub fn is_password_usable(encoded: &str) -> bool {
    !encoded.starts_with(UNUSABLE_PASSWORD_PREFIX)
}

pub fn check_password(raw: &str, encoded: &str) -> bool {
    if !is_password_usable(encoded) {
        return false;
    }
    match PasswordHash::new(encoded) {
        Ok(parsed) => Argon2::default().verify_password(raw.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

impl SummaryItem {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self { label: label.to_string(), value: value.into() }
    }
}

fn mask_hash(value: &str) -> String {
    let shown: String = value.chars().take(MASK_SHOW).collect();
    let hidden = value.chars().count().saturating_sub(MASK_SHOW);
    format!("{}{}", shown, "*".repeat(hidden))
}

/// Describe a stored hash without revealing enough of it to be useful.
pub fn safe_summary(encoded: &str) -> Vec<SummaryItem> {
    if !is_password_usable(encoded) {
        return vec![SummaryItem::new("password", "No password set.")];
    }
    let parsed = match PasswordHash::new(encoded) {
        Ok(parsed) => parsed,
        Err(_) => {
            return vec![SummaryItem::new(
                "password",
                "Invalid password format or unknown hashing algorithm.",
            )]
        }
    };

    let param = |name: &str| {
        parsed
            .params
            .get_decimal(name)
            .map(|v| v.to_string())
            .unwrap_or_default()
    };

    vec![
        SummaryItem::new("algorithm", "argon2"),
        SummaryItem::new("variety", parsed.algorithm.as_str()),
        SummaryItem::new("version", parsed.version.map(|v| v.to_string()).unwrap_or_default()),
        SummaryItem::new("memory cost", param("m")),
        SummaryItem::new("time cost", param("t")),
        SummaryItem::new("parallelism", param("p")),
        SummaryItem::new("salt", mask_hash(parsed.salt.map(|s| s.as_str()).unwrap_or_default())),
        SummaryItem::new("hash", mask_hash(&parsed.hash.map(|h| h.to_string()).unwrap_or_default())),
    ]
}
