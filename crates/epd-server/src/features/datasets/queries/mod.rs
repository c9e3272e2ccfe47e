//! Read operations for datasets

pub mod chart_data;
pub mod get;
pub mod list;

pub use chart_data::{ChartDataError, ChartDataQuery};
pub use get::{GetDatasetError, GetDatasetQuery};
pub use list::{ListDatasetsError, ListDatasetsQuery};
