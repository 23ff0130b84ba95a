pub mod auth;
pub mod contact;
pub mod pricing;
pub mod projects;
pub mod public;
