//! Application services: the company directory and cached history access.

pub mod directory;
pub mod history;

pub use directory::{Directory, SearchMatch};
pub use history::HistoryService;
