//! Batform: a social feed persisted in a flat key-value store.
//!
//! [`Store`] owns the users, posts, comments, likes, follows, saved posts
//! and notifications collections. [`auth`] and [`handlers`] are the flows
//! that front ends call on top of it.

pub mod config;
pub mod core {
    pub mod db;
    pub mod errors;
    pub mod helpers;
    pub mod kv;
}
pub mod models {
    #[allow(clippy::module_inception)]
    pub mod models;
}

pub mod auth;
pub mod follow;
pub mod handlers;
pub mod likes;
pub mod notifications;
pub mod posts;
pub mod users;

pub use crate::config::StoreConfig;
pub use crate::core::db::Store;
pub use crate::core::errors::{StoreError, StoreResult};
pub use crate::core::helpers::{format_time_ago, Clock, ManualClock, SystemClock};
pub use crate::core::kv::{KeyValue, MemoryKv};
