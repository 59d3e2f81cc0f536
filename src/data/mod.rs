//! Data module - CSV loading and dataset preparation

mod dataset;
mod loader;
mod processor;
pub mod schema;

pub use dataset::Dataset;
pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
pub use schema::Medal;
