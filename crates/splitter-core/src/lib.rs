//! Order-split workflow.
//!
//! Given an inbound order whose note links to a CSV file, the workflow creates
//! one child order per CSV row and then cancels the parent order. Orders without
//! a link are left untouched.

pub mod builder;
pub mod note;
pub mod workflow;

pub use builder::{build_child_order, split_name};
pub use note::extract_csv_url;
pub use workflow::{OrderSplitter, SplitError, SplitOutcome};
