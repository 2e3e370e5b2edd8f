pub mod answer;
pub mod result;
pub mod user;
