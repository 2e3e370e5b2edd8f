pub mod error;
pub mod types;
pub mod weeks;
