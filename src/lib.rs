pub mod admin;
pub mod auth;
pub mod config;
pub mod db;
pub mod forms;
pub mod routes;
pub mod types;
pub mod utils;
