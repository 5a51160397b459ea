mod collector;
mod fetcher;
mod persister;

pub use collector::*;
pub use fetcher::*;
pub use persister::*;
