//! `hrportal-session` — durable storage of the single session record.
//!
//! The store holds zero or one [`hrportal_core::UserRecord`] under the `user`
//! key, with an expiry applied at write time. It performs no validation of
//! the record's contents; that is the auth engine's job.

pub mod file;
pub mod memory;
pub mod store;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;
pub use store::{SessionStore, SessionStoreError};
