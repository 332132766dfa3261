use crate::config::{LIKES_KEY, SAVED_POSTS_KEY};
use crate::core::db::Store;
use crate::core::errors::StoreResult;
use crate::core::kv::KeyValue;
use crate::models::models::{Like, Post, SavedPost};

impl<K: KeyValue> Store<K> {
    pub fn get_likes(&self) -> StoreResult<Vec<Like>> {
        self.load(LIKES_KEY)
    }

    pub fn get_like_count(&self, post_id: &str) -> StoreResult<usize> {
        Ok(self
            .get_likes()?
            .iter()
            .filter(|l| l.post_id == post_id)
            .count())
    }

    pub fn has_user_liked(&self, post_id: &str, user_id: &str) -> StoreResult<bool> {
        Ok(self
            .get_likes()?
            .iter()
            .any(|l| l.post_id == post_id && l.user_id == user_id))
    }

    /// Flips the like for (`post_id`, `user_id`); returns whether it is now
    /// active.
    pub fn toggle_like(&self, post_id: &str, user_id: &str) -> StoreResult<bool> {
        let mut likes = self.get_likes()?;
        let liked = match likes
            .iter()
            .position(|l| l.post_id == post_id && l.user_id == user_id)
        {
            Some(index) => {
                likes.remove(index);
                false
            }
            None => {
                likes.push(Like {
                    post_id: post_id.to_string(),
                    user_id: user_id.to_string(),
                });
                true
            }
        };
        self.save(LIKES_KEY, &likes)?;

        tracing::debug!(post_id, user_id, liked, "Like toggled");
        Ok(liked)
    }

    /// Likes received across all of `user_id`'s posts.
    pub fn get_total_likes_for_user(&self, user_id: &str) -> StoreResult<usize> {
        let post_ids: Vec<String> = self
            .get_posts_by_user(user_id)?
            .into_iter()
            .map(|p| p.id)
            .collect();
        Ok(self
            .get_likes()?
            .iter()
            .filter(|l| post_ids.contains(&l.post_id))
            .count())
    }

    // === Saved posts ===

    pub fn get_saved_posts(&self) -> StoreResult<Vec<SavedPost>> {
        self.load(SAVED_POSTS_KEY)
    }

    pub fn has_user_saved(&self, post_id: &str, user_id: &str) -> StoreResult<bool> {
        Ok(self
            .get_saved_posts()?
            .iter()
            .any(|s| s.post_id == post_id && s.user_id == user_id))
    }

    pub fn toggle_save_post(&self, post_id: &str, user_id: &str) -> StoreResult<bool> {
        let mut saved = self.get_saved_posts()?;
        let now_saved = match saved
            .iter()
            .position(|s| s.post_id == post_id && s.user_id == user_id)
        {
            Some(index) => {
                saved.remove(index);
                false
            }
            None => {
                saved.push(SavedPost {
                    post_id: post_id.to_string(),
                    user_id: user_id.to_string(),
                    saved_at: self.now(),
                });
                true
            }
        };
        self.save(SAVED_POSTS_KEY, &saved)?;

        tracing::debug!(post_id, user_id, saved = now_saved, "Save toggled");
        Ok(now_saved)
    }

    /// Posts `user_id` saved, most recently saved first. Entries whose post
    /// no longer exists are skipped.
    pub fn get_user_saved_posts(&self, user_id: &str) -> StoreResult<Vec<Post>> {
        let mut entries: Vec<SavedPost> = self
            .get_saved_posts()?
            .into_iter()
            .filter(|s| s.user_id == user_id)
            .collect();
        entries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));

        let posts = self.get_posts()?;
        Ok(entries
            .iter()
            .filter_map(|s| posts.iter().find(|p| p.id == s.post_id).cloned())
            .collect())
    }
}
