pub mod description;

pub use description::{ApiDescription, Location, Operation, ParamType, ParameterDecl, PathItem};
