//! Pollution record domain module.
//!
//! Records arrive from the API in more than one shape. They are normalized
//! into [`Record`] once, at ingestion, so nothing downstream branches on
//! field spellings.

mod model;
mod service;

pub use model::{Author, Record, RecordId, RecordPayload};
pub use service::RecordService;
