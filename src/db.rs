pub mod user_repo;
pub use user_repo::UserRepository;
pub mod category_repo;
pub use category_repo::CategoryRepository;
pub mod bill_repo;
pub use bill_repo::BillRepository;
