//! Admin registration for the user model.
//!
//! The configuration is declarative: which columns the changelist shows, which
//! booleans it filters on, which fields search looks at, and how the add and
//! change forms are laid out. Routes read it; nothing here touches the database.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::db::user::DEFAULT_PER_PAGE;
use crate::types::user::UserRes;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Fieldset {
    pub name: Option<String>,
    pub classes: Vec<String>,
    pub fields: Vec<String>,
}

impl Fieldset {
    fn new(name: Option<&str>, fields: &[&str]) -> Self {
        Self {
            name: name.map(str::to_string),
            classes: Vec::new(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelAdmin {
    pub model_name: String,
    pub table_name: String,
    pub list_display: Vec<String>,
    pub list_filter: Vec<String>,
    pub search_fields: Vec<String>,
    pub ordering: Vec<String>,
    pub fieldsets: Vec<Fieldset>,
    pub add_fieldsets: Vec<Fieldset>,
    pub filter_horizontal: Vec<String>,
    pub list_per_page: u64,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The user admin: email-keyed, with password handled by dedicated forms.
pub fn user_admin() -> ModelAdmin {
    ModelAdmin {
        model_name: "user".to_string(),
        table_name: "account_user".to_string(),
        list_display: strings(&["email", "first_name", "last_name", "is_admin", "is_active"]),
        list_filter: strings(&["is_admin", "is_active"]),
        search_fields: strings(&["email", "first_name", "last_name", "username"]),
        ordering: strings(&["email"]),
        fieldsets: vec![
            Fieldset::new(None, &["email", "password"]),
            Fieldset::new(
                Some("Personal info"),
                &["first_name", "last_name", "nickname", "date_of_birth", "username", "phone_number"],
            ),
            Fieldset::new(Some("Permissions"), &["is_admin", "is_active"]),
        ],
        add_fieldsets: vec![Fieldset::new(
            None,
            &[
                "email", "date_of_birth", "first_name", "last_name",
                "nickname", "username", "phone_number",
                "password1", "password2",
            ],
        )
        .with_classes(&["wide"])],
        filter_horizontal: Vec::new(),
        list_per_page: DEFAULT_PER_PAGE,
    }
}

impl ModelAdmin {
    /// One changelist row: `id` plus the `list_display` columns, in order.
    pub fn list_row(&self, user: &UserRes) -> Map<String, Value> {
        let mut row = Map::new();
        let full = match serde_json::to_value(user) {
            Ok(Value::Object(map)) => map,
            _ => return row,
        };
        row.insert("id".to_string(), Value::String(user.id.to_string()));
        for column in &self.list_display {
            row.insert(column.clone(), full.get(column).cloned().unwrap_or(Value::Null));
        }
        row
    }
}

/// Models reachable through `/admin`.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSite {
    pub site_header: String,
    pub models: Vec<ModelAdmin>,
}

impl AdminSite {
    pub fn new(site_header: &str) -> Self {
        Self { site_header: site_header.to_string(), models: Vec::new() }
    }

    pub fn register(&mut self, admin: ModelAdmin) {
        self.models.retain(|m| m.model_name != admin.model_name);
        self.models.push(admin);
    }

    pub fn get(&self, model_name: &str) -> Option<&ModelAdmin> {
        self.models.iter().find(|m| m.model_name == model_name)
    }
}

impl Default for AdminSite {
    fn default() -> Self {
        let mut site = AdminSite::new("Account administration");
        site.register(user_admin());
        site
    }
}
