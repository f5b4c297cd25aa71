//! `reqwest` clients for the Ecowatch REST API.

mod auth;
mod client;
mod records;

pub use auth::HttpAuthService;
pub use client::ApiClient;
pub use records::HttpRecordService;
