use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::*;
use crate::core::errors::{StoreError, StoreResult};
use crate::core::helpers::{format_time_ago, Clock, SystemClock};
use crate::core::kv::KeyValue;
use crate::models::models::{NewPost, NewUser, SessionUser, User};

/// Repository over the seven entity collections and the session key.
///
/// Every operation reads the whole collection it touches, computes the next
/// state in memory and writes the collection back. There is exactly one
/// writer per backend.
pub struct Store<K: KeyValue> {
    kv: K,
    clock: Box<dyn Clock>,
    config: StoreConfig,
}

impl<K: KeyValue> Store<K> {
    pub fn new(kv: K) -> Self {
        Self::with_config(kv, StoreConfig::default())
    }

    pub fn with_config(kv: K, config: StoreConfig) -> Self {
        Store {
            kv,
            clock: Box::new(SystemClock),
            config,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn backend(&self) -> &K {
        &self.kv
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// `format_time_ago` against this store's clock.
    pub fn time_ago(&self, timestamp: DateTime<Utc>) -> String {
        format_time_ago(timestamp, self.now())
    }

    // === Collection plumbing ===

    pub(crate) fn load<T: DeserializeOwned>(&self, name: &str) -> StoreResult<Vec<T>> {
        Ok(self.read_json(name)?.unwrap_or_default())
    }

    pub(crate) fn save<T: Serialize>(&self, name: &str, records: &[T]) -> StoreResult<()> {
        self.write_json(name, &records)?;
        tracing::debug!(key = %self.config.key(name), records = records.len(), "Saved collection");
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> StoreResult<Option<T>> {
        let key = self.config.key(name);
        let Some(bytes) = self.kv.get(&key)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            tracing::warn!(key = %key, error = %e, "Stored payload failed to decode");
            StoreError::Corrupt {
                key,
                message: e.to_string(),
            }
        })
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> StoreResult<()> {
        let key = self.config.key(name);
        let bytes = serde_json::to_vec(value).map_err(|e| StoreError::Encode {
            key: key.clone(),
            message: e.to_string(),
        })?;
        self.kv.set(&key, &bytes)?;
        Ok(())
    }

    // === Session ===

    pub fn set_current_user(&self, user: &User) -> StoreResult<()> {
        self.write_json(CURRENT_USER_KEY, &SessionUser::from(user))
    }

    pub fn get_current_user(&self) -> StoreResult<Option<SessionUser>> {
        self.read_json(CURRENT_USER_KEY)
    }

    pub fn logout_user(&self) -> StoreResult<()> {
        self.kv.delete(&self.config.key(CURRENT_USER_KEY))?;
        Ok(())
    }

    pub fn is_logged_in(&self) -> StoreResult<bool> {
        Ok(self.get_current_user()?.is_some())
    }

    // === Maintenance ===

    /// Removes every collection and the session key.
    pub fn clear_all_data(&self) -> StoreResult<()> {
        for name in ALL_KEYS {
            self.kv.delete(&self.config.key(name))?;
        }
        tracing::info!(prefix = %self.config.key_prefix, "All data cleared");
        Ok(())
    }

    /// Creates the demo accounts and their first posts. Safe to call on
    /// every start: accounts that already exist are left alone.
    pub fn seed_demo_data(&self) -> StoreResult<()> {
        let demo = [
            ("test", "Test User", "This is my first post on Batform!"),
            ("alice", "Alice", "Welcome to my board! Excited to share thoughts here."),
            ("bob", "Bob", "Hey everyone! Just joined, looking forward to connecting with you all."),
        ];

        let mut created = 0;
        for (username, full_name, first_post) in demo {
            if self.get_user_by_username(username)?.is_some() {
                continue;
            }
            let user = self.create_user(NewUser {
                username: username.to_string(),
                email: format!("{}@batform.test", username),
                password: format!("{}-password", username),
                full_name: Some(full_name.to_string()),
                avatar: None,
            })?;
            self.create_post(NewPost {
                author_id: user.id,
                content: first_post.to_string(),
                image: None,
                media_type: None,
            })?;
            created += 1;
        }

        // "test" follows "bob"
        if let (Some(test), Some(bob)) = (
            self.get_user_by_username("test")?,
            self.get_user_by_username("bob")?,
        ) {
            if !self.is_following(&test.id, &bob.id)? {
                self.toggle_follow(&test.id, &bob.id)?;
            }
        }

        tracing::info!(created, "Demo data seeded");
        Ok(())
    }
}
