pub mod accounts;
pub mod auth;
pub mod contact;
pub mod menu;
pub mod properties;
pub mod reviews;
