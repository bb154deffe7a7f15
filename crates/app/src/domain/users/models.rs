//! User Models

use jiff::Timestamp;

/// User Model
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub registration_date: Timestamp,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}
