//! User actions that touch more than one collection: the toggle itself plus
//! the notification the other party receives.

use crate::core::db::Store;
use crate::core::errors::{StoreError, StoreResult};
use crate::core::kv::KeyValue;
use crate::models::models::{Comment, NewComment, NewNotification, NotificationType};

pub fn handle_like<K: KeyValue>(store: &Store<K>, post_id: &str, actor_id: &str) -> StoreResult<bool> {
    let post = store
        .get_post_by_id(post_id)?
        .ok_or_else(|| StoreError::NotFound("Post not found".to_string()))?;

    let liked = store.toggle_like(post_id, actor_id)?;
    if liked && post.author_id != actor_id {
        store.create_notification(NewNotification {
            user_id: post.author_id,
            kind: NotificationType::Like,
            from_user_id: actor_id.to_string(),
            post_id: Some(post_id.to_string()),
        })?;
    }

    Ok(liked)
}

pub fn handle_comment<K: KeyValue>(
    store: &Store<K>,
    post_id: &str,
    actor_id: &str,
    text: &str,
) -> StoreResult<Comment> {
    let text = text.trim();
    if text.is_empty() {
        return Err(StoreError::Invalid("Comment cannot be empty".to_string()));
    }
    let post = store
        .get_post_by_id(post_id)?
        .ok_or_else(|| StoreError::NotFound("Post not found".to_string()))?;

    let comment = store.create_comment(NewComment {
        post_id: post_id.to_string(),
        author_id: actor_id.to_string(),
        text: text.to_string(),
    })?;

    if post.author_id != actor_id {
        store.create_notification(NewNotification {
            user_id: post.author_id,
            kind: NotificationType::Comment,
            from_user_id: actor_id.to_string(),
            post_id: Some(post_id.to_string()),
        })?;
    }

    Ok(comment)
}

pub fn handle_follow<K: KeyValue>(store: &Store<K>, actor_id: &str, target_id: &str) -> StoreResult<bool> {
    if store.get_user_by_id(target_id)?.is_none() {
        return Err(StoreError::NotFound("Target user not found".to_string()));
    }

    let following = store.toggle_follow(actor_id, target_id)?;
    if following {
        store.create_notification(NewNotification {
            user_id: target_id.to_string(),
            kind: NotificationType::Follow,
            from_user_id: actor_id.to_string(),
            post_id: None,
        })?;
    }

    Ok(following)
}

pub fn handle_save<K: KeyValue>(store: &Store<K>, post_id: &str, actor_id: &str) -> StoreResult<bool> {
    if store.get_post_by_id(post_id)?.is_none() {
        return Err(StoreError::NotFound("Post not found".to_string()));
    }
    store.toggle_save_post(post_id, actor_id)
}
