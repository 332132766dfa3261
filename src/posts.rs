use crate::config::{COMMENTS_KEY, LIKES_KEY, POSTS_KEY};
use crate::core::db::Store;
use crate::core::errors::{StoreError, StoreResult};
use crate::core::helpers::generate_id;
use crate::core::kv::KeyValue;
use crate::models::models::{Comment, Like, NewComment, NewPost, Post};

impl<K: KeyValue> Store<K> {
    /// All posts in stored order (newest insert first).
    pub fn get_posts(&self) -> StoreResult<Vec<Post>> {
        self.load(POSTS_KEY)
    }

    pub fn create_post(&self, new_post: NewPost) -> StoreResult<Post> {
        if new_post.content.trim().is_empty() && new_post.image.is_none() {
            return Err(StoreError::Invalid(
                "Post needs text or media".to_string(),
            ));
        }
        if new_post.content.chars().count() > self.config().max_post_length {
            return Err(StoreError::Invalid("Post content too long".to_string()));
        }

        let post = Post {
            id: generate_id(),
            author_id: new_post.author_id,
            content: new_post.content,
            image: new_post.image,
            media_type: new_post.media_type,
            created_at: self.now(),
        };

        let mut posts = self.get_posts()?;
        posts.insert(0, post.clone()); // prepend newest
        self.save(POSTS_KEY, &posts)?;

        Ok(post)
    }

    pub fn get_post_by_id(&self, post_id: &str) -> StoreResult<Option<Post>> {
        Ok(self.get_posts()?.into_iter().find(|p| p.id == post_id))
    }

    /// Posts by `user_id`, newest first.
    pub fn get_posts_by_user(&self, user_id: &str) -> StoreResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .get_posts()?
            .into_iter()
            .filter(|p| p.author_id == user_id)
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    /// Every post, newest first.
    pub fn get_feed_posts(&self) -> StoreResult<Vec<Post>> {
        let mut posts = self.get_posts()?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    /// Removes the post together with its comments and likes. Saved-post
    /// entries and notifications that point at it are left in place.
    /// Returns whether a post was removed.
    pub fn delete_post(&self, post_id: &str) -> StoreResult<bool> {
        // All three collections must decode before anything is written
        let mut posts = self.get_posts()?;
        let mut comments: Vec<Comment> = self.get_comments()?;
        let mut likes: Vec<Like> = self.get_likes()?;

        let before = posts.len();
        posts.retain(|p| p.id != post_id);
        let removed = posts.len() != before;
        comments.retain(|c| c.post_id != post_id);
        likes.retain(|l| l.post_id != post_id);

        self.save(POSTS_KEY, &posts)?;
        self.save(COMMENTS_KEY, &comments)?;
        self.save(LIKES_KEY, &likes)?;

        tracing::debug!(post_id, removed, "Post deleted");
        Ok(removed)
    }

    // === Comments ===

    pub fn get_comments(&self) -> StoreResult<Vec<Comment>> {
        self.load(COMMENTS_KEY)
    }

    pub fn create_comment(&self, new_comment: NewComment) -> StoreResult<Comment> {
        let comment = Comment {
            id: generate_id(),
            post_id: new_comment.post_id,
            author_id: new_comment.author_id,
            text: new_comment.text,
            created_at: self.now(),
        };

        let mut comments = self.get_comments()?;
        comments.push(comment.clone());
        self.save(COMMENTS_KEY, &comments)?;

        Ok(comment)
    }

    /// Comments on `post_id`, oldest first.
    pub fn get_comments_by_post(&self, post_id: &str) -> StoreResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .get_comments()?
            .into_iter()
            .filter(|c| c.post_id == post_id)
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    pub fn get_comment_count(&self, post_id: &str) -> StoreResult<usize> {
        Ok(self
            .get_comments()?
            .iter()
            .filter(|c| c.post_id == post_id)
            .count())
    }

    pub fn get_comment_by_id(&self, comment_id: &str) -> StoreResult<Option<Comment>> {
        Ok(self.get_comments()?.into_iter().find(|c| c.id == comment_id))
    }

    pub fn delete_comment(&self, comment_id: &str) -> StoreResult<bool> {
        let mut comments = self.get_comments()?;
        let before = comments.len();
        comments.retain(|c| c.id != comment_id);
        self.save(COMMENTS_KEY, &comments)?;
        Ok(comments.len() != before)
    }
}
