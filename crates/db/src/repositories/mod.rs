pub mod test_result_repo;
pub mod user_repo;

pub use test_result_repo::TestResultRepo;
pub use user_repo::UserRepo;
