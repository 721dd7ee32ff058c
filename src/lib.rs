pub mod error;
pub mod loader;
pub mod middleware;
pub mod models;
pub mod validation;

pub use error::{GuardError, Result};
pub use middleware::{DefaultErrorHandler, ErrorHandler, ValidationLayer, Validator, ValidatorOptions};
pub use models::ApiDescription;
pub use validation::{ErrorKind, ValidationError};
