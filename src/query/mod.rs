//! Shared in-memory query pipeline: filter, search, sort, paginate, export,
//! aggregate. Every resource endpoint is built from these pieces.

pub mod export;
pub mod paginate;
pub mod path;
pub mod search;
pub mod sort;
pub mod stats;

pub use export::{export, ExportFormat};
pub use paginate::{paginate, Pagination};
pub use path::{display_value, leaf_name, value_at};
pub use search::{filter_by_fields, search};
pub use sort::{sort_by_field, SortDirection};
pub use stats::{aggregate, Aggregates, UNSET_BUCKET};
