//! External service interactions
//!
//! This module contains services for interacting with external systems:
//! - Backend REST calls
//! - Background request execution
//! - Contact CSV parsing
//! - Saving generated audio

pub mod api;
pub mod audio;
pub mod error;
pub mod import;
pub mod runner;

pub use api::{ApiClient, ApiRequest, ApiResponse, FieldMap};
pub use error::ApiError;
pub use import::{load_contacts_csv, ImportPlan, MAX_BATCH_ROWS};
pub use runner::{Completion, RequestRunner};
