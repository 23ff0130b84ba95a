pub mod contact;
pub mod project;
pub mod record_id;
pub mod save_response;
