use crate::config::FOLLOWS_KEY;
use crate::core::db::Store;
use crate::core::errors::{StoreError, StoreResult};
use crate::core::kv::KeyValue;
use crate::models::models::{Follow, User};

impl<K: KeyValue> Store<K> {
    pub fn get_follows(&self) -> StoreResult<Vec<Follow>> {
        self.load(FOLLOWS_KEY)
    }

    pub fn is_following(&self, follower_id: &str, following_id: &str) -> StoreResult<bool> {
        Ok(self
            .get_follows()?
            .iter()
            .any(|f| f.follower_id == follower_id && f.following_id == following_id))
    }

    /// Follows or unfollows; returns whether `follower_id` now follows
    /// `following_id`. Following yourself is rejected.
    pub fn toggle_follow(&self, follower_id: &str, following_id: &str) -> StoreResult<bool> {
        if follower_id == following_id {
            return Err(StoreError::Invalid("Cannot follow yourself".to_string()));
        }

        let mut follows = self.get_follows()?;
        let following = match follows
            .iter()
            .position(|f| f.follower_id == follower_id && f.following_id == following_id)
        {
            Some(index) => {
                follows.remove(index);
                false
            }
            None => {
                follows.push(Follow {
                    follower_id: follower_id.to_string(),
                    following_id: following_id.to_string(),
                    created_at: self.now(),
                });
                true
            }
        };
        self.save(FOLLOWS_KEY, &follows)?;

        tracing::debug!(follower_id, following_id, following, "Follow toggled");
        Ok(following)
    }

    pub fn get_follower_count(&self, user_id: &str) -> StoreResult<usize> {
        Ok(self
            .get_follows()?
            .iter()
            .filter(|f| f.following_id == user_id)
            .count())
    }

    pub fn get_following_count(&self, user_id: &str) -> StoreResult<usize> {
        Ok(self
            .get_follows()?
            .iter()
            .filter(|f| f.follower_id == user_id)
            .count())
    }

    /// Users following `user_id`. Edges to users that no longer resolve are
    /// dropped.
    pub fn get_followers(&self, user_id: &str) -> StoreResult<Vec<User>> {
        let users = self.get_users()?;
        Ok(self
            .get_follows()?
            .iter()
            .filter(|f| f.following_id == user_id)
            .filter_map(|f| users.iter().find(|u| u.id == f.follower_id).cloned())
            .collect())
    }

    /// Users `user_id` follows.
    pub fn get_following(&self, user_id: &str) -> StoreResult<Vec<User>> {
        let users = self.get_users()?;
        Ok(self
            .get_follows()?
            .iter()
            .filter(|f| f.follower_id == user_id)
            .filter_map(|f| users.iter().find(|u| u.id == f.following_id).cloned())
            .collect())
    }

    /// Up to `limit` users, in sign-up order, that `user_id` is not yet
    /// following (excluding `user_id` itself). Without a limit the
    /// configured `suggestion_limit` applies.
    pub fn get_follow_suggestions(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> StoreResult<Vec<User>> {
        let limit = limit.unwrap_or(self.config().suggestion_limit);
        let follows = self.get_follows()?;
        Ok(self
            .get_users()?
            .into_iter()
            .filter(|u| u.id != user_id)
            .filter(|u| {
                !follows
                    .iter()
                    .any(|f| f.follower_id == user_id && f.following_id == u.id)
            })
            .take(limit)
            .collect())
    }
}
