//! ResourceService: generic operations over cataloged resources.

mod resource;
mod validation;
pub use resource::{
    BulkError, BulkOperation, BulkOutcome, ExportFile, ListQuery, Page, ResourceService,
    StatsSummary,
};
pub use validation::PayloadValidator;

pub(crate) use resource::as_object;
