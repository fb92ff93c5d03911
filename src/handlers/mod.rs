//! HTTP handlers for resource operations and catalog introspection.

pub mod catalog;
pub mod resource;
pub use catalog::*;
pub use resource::*;
