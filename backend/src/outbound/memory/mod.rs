//! Process-local repositories used when no database is configured.
//!
//! State lives behind a [`std::sync::Mutex`] and is lost on restart. A
//! poisoned lock is recovered rather than surfaced; every critical section
//! leaves the maps consistent.

mod complaints;
mod users;

pub use complaints::InMemoryComplaintRepository;
pub use users::InMemoryUserRepository;
