//! In-memory repositories - used when no database is configured, and by tests.
//!
//! Data is lost on process restart.

mod posts;
mod users;

pub use posts::InMemoryPostRepository;
pub use users::InMemoryUserRepository;
