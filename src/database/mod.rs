pub mod manager;
pub mod models;
pub mod repository;
pub mod seed;
pub mod validate;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{Repository, Resource, ResourceInput};
