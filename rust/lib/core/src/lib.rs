pub mod config;
pub mod error;
pub mod module;
pub mod types;

pub use config::{DEFAULT_LIMIT, DEFAULT_SEED_PAGE_SIZE, DEFAULT_SEED_URL, ServiceConfig};
pub use error::ServiceError;
pub use module::Module;
pub use types::{ListParams, ListResult, is_valid_id, merge_patch, new_id};
