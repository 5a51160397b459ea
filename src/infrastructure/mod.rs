mod collector_sequential;
mod exporter;
mod fetcher_rest;
mod persister_csv;

pub use collector_sequential::*;
pub use exporter::*;
pub use fetcher_rest::*;
pub use persister_csv::*;
