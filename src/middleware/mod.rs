mod layer;
mod validator;

pub use layer::{ValidationLayer, ValidationService};
pub use validator::{DefaultErrorHandler, ErrorHandler, Validator, ValidatorOptions};
