//! Vitrine Domain Concerns

pub mod achievements;
pub mod cart;
pub mod catalog;
pub mod categories;
pub mod checkout;
pub mod images;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod users;
