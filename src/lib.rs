pub mod auth;
pub mod cli_app;
pub mod command_logic;
pub mod config;
pub mod constants;
pub mod contact;
pub mod external_api;
pub mod pricing;
pub mod store;
pub mod sync;
pub mod utils;

pub use cli_app::{handle_command, Cli};
pub use config::Config;
pub use external_api::site_api::SiteApi;
pub use external_api::ApiError;
