//! Pluggable password strength checks.
//!
//! A [`PasswordPolicy`] runs every configured [`PasswordValidator`] and reports
//! all failures at once so forms can show the full list next to the field.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::config::PasswordConfig;

const COMMON_PASSWORDS: &str = include_str!("common-passwords.txt");

/// Personal attributes a password should not resemble.
#[derive(Debug, Clone, Default)]
pub struct UserAttributes {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserAttributes {
    fn get(&self, name: &str) -> Option<&str> {
        match name {
            "email" => Some(&self.email),
            "username" => Some(&self.username),
            "first_name" => Some(&self.first_name),
            "last_name" => Some(&self.last_name),
            _ => None,
        }
    }
}

impl From<&entity::user::Model> for UserAttributes {
    fn from(user: &entity::user::Model) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

pub trait PasswordValidator: Send + Sync {
    fn validate(&self, password: &str, user: Option<&UserAttributes>) -> Result<(), String>;
    fn help_text(&self) -> String;
}

pub struct UserAttributeSimilarityValidator {
    attributes: Vec<&'static str>,
    max_similarity: f64,
}

impl UserAttributeSimilarityValidator {
    pub const DEFAULT_ATTRIBUTES: [&'static str; 4] = ["username", "first_name", "last_name", "email"];

    pub fn new(max_similarity: f64) -> Self {
        // anything lower would reject nearly every password
        let max_similarity = max_similarity.max(0.1);
        Self { attributes: Self::DEFAULT_ATTRIBUTES.to_vec(), max_similarity }
    }
}

fn verbose_name(attribute: &str) -> String {
    attribute.replace('_', " ")
}

/// Upper bound on similarity: shared characters regardless of order.
fn quick_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_insert(0) += 1;
    }
    let mut matches = 0usize;
    for c in a.chars() {
        if let Some(n) = available.get_mut(&c) {
            if *n > 0 {
                *n -= 1;
                matches += 1;
            }
        }
    }
    2.0 * matches as f64 / total as f64
}

/// A long password cannot be "similar" to a very short value.
fn exceeds_maximum_length_ratio(password: &str, max_similarity: f64, value: &str) -> bool {
    let pwd_len = password.chars().count();
    let value_len = value.chars().count();
    let length_bound_similarity = max_similarity / 2.0 * pwd_len as f64;
    pwd_len >= 10 * value_len && (value_len as f64) < length_bound_similarity
}

impl PasswordValidator for UserAttributeSimilarityValidator {
    fn validate(&self, password: &str, user: Option<&UserAttributes>) -> Result<(), String> {
        let Some(user) = user else { return Ok(()) };
        let password = password.to_lowercase();

        for attribute in &self.attributes {
            let Some(value) = user.get(attribute).filter(|v| !v.is_empty()) else { continue };
            let value = value.to_lowercase();
            let parts = value
                .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                .filter(|p| !p.is_empty())
                .chain(std::iter::once(value.as_str()));

            for part in parts {
                if exceeds_maximum_length_ratio(&password, self.max_similarity, part) {
                    continue;
                }
                if quick_ratio(&password, part) >= self.max_similarity {
                    return Err(format!("The password is too similar to the {}.", verbose_name(attribute)));
                }
            }
        }
        Ok(())
    }

    fn help_text(&self) -> String {
        "Your password can't be too similar to your other personal information.".to_string()
    }
}

pub struct MinimumLengthValidator {
    min_length: usize,
}

impl MinimumLengthValidator {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    fn characters(&self) -> &'static str {
        if self.min_length == 1 { "character" } else { "characters" }
    }
}

impl PasswordValidator for MinimumLengthValidator {
    fn validate(&self, password: &str, _user: Option<&UserAttributes>) -> Result<(), String> {
        if password.chars().count() < self.min_length {
            return Err(format!(
                "This password is too short. It must contain at least {} {}.",
                self.min_length,
                self.characters()
            ));
        }
        Ok(())
    }

    fn help_text(&self) -> String {
        format!("Your password must contain at least {} {}.", self.min_length, self.characters())
    }
}

pub struct CommonPasswordValidator {
    passwords: HashSet<String>,
}

impl CommonPasswordValidator {
    pub fn new() -> Self {
        Self::from_list(COMMON_PASSWORDS)
    }

    /// One password per line; blank lines are skipped.
    pub fn from_list(list: &str) -> Self {
        let passwords = list
            .lines()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        Self { passwords }
    }

    /// Load a list from disk; a `.gz` suffix means gzip-compressed.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let file = BufReader::new(File::open(path)?);
        let mut list = String::new();
        if path.extension().is_some_and(|ext| ext == "gz") {
            GzDecoder::new(file).read_to_string(&mut list)?;
        } else {
            let mut file = file;
            file.read_to_string(&mut list)?;
        }
        Ok(Self::from_list(&list))
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }
}

impl Default for CommonPasswordValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordValidator for CommonPasswordValidator {
    fn validate(&self, password: &str, _user: Option<&UserAttributes>) -> Result<(), String> {
        if self.passwords.contains(&password.trim().to_lowercase()) {
            return Err("This password is too common.".to_string());
        }
        Ok(())
    }

    fn help_text(&self) -> String {
        "Your password can't be a commonly used password.".to_string()
    }
}

pub struct NumericPasswordValidator;

/// Decimal-style digits: ASCII and other scripts' digits count, fractions and
/// Roman numerals (U+00BC..U+00BE, Number Forms block) do not.
fn is_digit(c: char) -> bool {
    if c.is_ascii_digit() {
        return true;
    }
    let fraction_or_numeral = matches!(c, '\u{00BC}'..='\u{00BE}' | '\u{2150}'..='\u{218B}');
    c.is_numeric() && !fraction_or_numeral
}

impl PasswordValidator for NumericPasswordValidator {
    fn validate(&self, password: &str, _user: Option<&UserAttributes>) -> Result<(), String> {
        if !password.is_empty() && password.chars().all(is_digit) {
            return Err("This password is entirely numeric.".to_string());
        }
        Ok(())
    }

    fn help_text(&self) -> String {
        "Your password can't be entirely numeric.".to_string()
    }
}

pub struct PasswordPolicy {
    validators: Vec<Box<dyn PasswordValidator>>,
}

impl PasswordPolicy {
    pub fn new(validators: Vec<Box<dyn PasswordValidator>>) -> Self {
        Self { validators }
    }

    /// Default validators; the common-password list comes from
    /// `cfg.common_list_path` when set, the embedded list otherwise.
    pub fn from_config(cfg: &PasswordConfig) -> io::Result<Self> {
        let common = match &cfg.common_list_path {
            Some(path) => CommonPasswordValidator::from_path(path)?,
            None => CommonPasswordValidator::new(),
        };
        Ok(Self::with_common(cfg, common))
    }

    fn with_common(cfg: &PasswordConfig, common: CommonPasswordValidator) -> Self {
        Self::new(vec![
            Box::new(UserAttributeSimilarityValidator::new(cfg.max_similarity)),
            Box::new(MinimumLengthValidator::new(cfg.min_length)),
            Box::new(common),
            Box::new(NumericPasswordValidator),
        ])
    }

    /// Every failure message, in validator order. Empty means the password passes.
    pub fn validate_password(&self, password: &str, user: Option<&UserAttributes>) -> Vec<String> {
        self.validators
            .iter()
            .filter_map(|v| v.validate(password, user).err())
            .collect()
    }

    pub fn help_texts(&self) -> Vec<String> {
        self.validators.iter().map(|v| v.help_text()).collect()
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::with_common(&PasswordConfig::default(), CommonPasswordValidator::new())
    }
}
