pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod history_codec;
pub mod seed;
