pub mod hasher;
pub mod password_validation;
