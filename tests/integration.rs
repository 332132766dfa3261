use batform::auth::{login, logout, signup, SignupForm};
use batform::handlers::{handle_comment, handle_follow, handle_like, handle_save};
use batform::models::models::{NewPost, NotificationType};
use batform::{ManualClock, MemoryKv, Store, StoreError};
use chrono::{Duration, TimeZone, Utc};

fn fresh_store() -> (Store<MemoryKv>, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 18, 30, 0).unwrap());
    let store = Store::new(MemoryKv::new()).with_clock(clock.clone());
    (store, clock)
}

fn form(username: &str) -> SignupForm {
    SignupForm {
        full_name: format!("{} Example", username),
        username: username.to_string(),
        email: format!("{}@example.com", username.trim().to_lowercase()),
        password: "correct-horse".to_string(),
        confirm_password: "correct-horse".to_string(),
    }
}

#[test]
fn test_full_user_flow() {
    let (store, clock) = fresh_store();

    // 1. Sign up two accounts; the second signup holds the session
    let author = signup(&store, form("  Writer_One ")).unwrap();
    assert_eq!(author.username, "writer_one");
    let reader = signup(&store, form("reader")).unwrap();
    assert_eq!(store.get_current_user().unwrap().unwrap().id, reader.id);

    // 2. Log in as the author by email
    let session = login(&store, "WRITER_ONE@example.com", "correct-horse").unwrap();
    assert_eq!(session.id, author.id);

    // 3. Author posts
    clock.advance(Duration::minutes(1));
    let post = store
        .create_post(NewPost {
            author_id: author.id.clone(),
            content: "Test post from integration test!".to_string(),
            image: None,
            media_type: None,
        })
        .unwrap();

    // 4. Reader likes, comments, follows and saves
    clock.advance(Duration::minutes(1));
    assert!(handle_like(&store, &post.id, &reader.id).unwrap());
    clock.advance(Duration::minutes(1));
    let comment = handle_comment(&store, &post.id, &reader.id, "  Nice one  ").unwrap();
    assert_eq!(comment.text, "Nice one");
    clock.advance(Duration::minutes(1));
    assert!(handle_follow(&store, &reader.id, &author.id).unwrap());
    assert!(handle_save(&store, &post.id, &reader.id).unwrap());

    // 5. Author sees three notifications, newest first
    let notifications = store.get_user_notifications(&author.id).unwrap();
    let kinds: Vec<NotificationType> = notifications.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        [NotificationType::Follow, NotificationType::Comment, NotificationType::Like]
    );
    assert!(notifications.iter().all(|n| n.from_user_id == reader.id));
    assert_eq!(notifications[0].post_id, None);
    assert_eq!(notifications[1].post_id.as_deref(), Some(post.id.as_str()));
    assert_eq!(store.get_unread_notification_count(&author.id).unwrap(), 3);

    assert_eq!(store.get_like_count(&post.id).unwrap(), 1);
    assert_eq!(store.get_comment_count(&post.id).unwrap(), 1);
    assert_eq!(store.get_follower_count(&author.id).unwrap(), 1);
    assert_eq!(store.get_user_saved_posts(&reader.id).unwrap()[0].id, post.id);
    assert_eq!(store.time_ago(post.created_at), "3m ago");

    // 6. Logout clears the session
    logout(&store).unwrap();
    assert!(!store.is_logged_in().unwrap());
}

#[test]
fn test_self_actions_do_not_notify() {
    let (store, _clock) = fresh_store();
    let user = signup(&store, form("solo")).unwrap();
    let post = store
        .create_post(NewPost {
            author_id: user.id.clone(),
            content: "talking to myself".to_string(),
            image: None,
            media_type: None,
        })
        .unwrap();

    assert!(handle_like(&store, &post.id, &user.id).unwrap());
    handle_comment(&store, &post.id, &user.id, "me again").unwrap();

    assert!(store.get_user_notifications(&user.id).unwrap().is_empty());
}

#[test]
fn test_unlike_and_unfollow_do_not_notify() {
    let (store, _clock) = fresh_store();
    let author = signup(&store, form("poster")).unwrap();
    let fan = signup(&store, form("fan")).unwrap();
    let post = store
        .create_post(NewPost {
            author_id: author.id.clone(),
            content: "hello".to_string(),
            image: None,
            media_type: None,
        })
        .unwrap();

    handle_like(&store, &post.id, &fan.id).unwrap();
    assert!(!handle_like(&store, &post.id, &fan.id).unwrap());
    handle_follow(&store, &fan.id, &author.id).unwrap();
    assert!(!handle_follow(&store, &fan.id, &author.id).unwrap());

    assert_eq!(store.get_user_notifications(&author.id).unwrap().len(), 2);
}

#[test]
fn test_handlers_reject_missing_targets() {
    let (store, _clock) = fresh_store();
    let user = signup(&store, form("lonely")).unwrap();

    assert!(matches!(
        handle_follow(&store, &user.id, "nobody"),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        handle_like(&store, "no-post", &user.id),
        Err(StoreError::NotFound(_))
    ));
    assert!(store.get_likes().unwrap().is_empty());
    assert!(matches!(
        handle_save(&store, "no-post", &user.id),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        handle_comment(&store, "no-post", &user.id, "hi"),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        handle_comment(&store, "no-post", &user.id, "   "),
        Err(StoreError::Invalid(_))
    ));
}

#[test]
fn test_signup_validation() {
    let (store, _clock) = fresh_store();

    let missing = SignupForm {
        email: String::new(),
        ..form("nomail")
    };
    assert!(matches!(signup(&store, missing), Err(StoreError::Invalid(_))));

    let mismatch = SignupForm {
        confirm_password: "different".to_string(),
        ..form("mismatch")
    };
    assert!(matches!(signup(&store, mismatch), Err(StoreError::Invalid(_))));

    let short = SignupForm {
        password: "abc".to_string(),
        confirm_password: "abc".to_string(),
        ..form("shorty")
    };
    assert!(matches!(signup(&store, short), Err(StoreError::Invalid(_))));

    let bad_email = SignupForm {
        email: "not-an-email".to_string(),
        ..form("bademail")
    };
    assert!(matches!(signup(&store, bad_email), Err(StoreError::Invalid(_))));

    let bad_username = form("no spaces allowed");
    assert!(matches!(signup(&store, bad_username), Err(StoreError::Invalid(_))));

    assert!(store.get_users().unwrap().is_empty());
    assert!(!store.is_logged_in().unwrap());
}

#[test]
fn test_signup_rejects_taken_username() {
    let (store, _clock) = fresh_store();
    signup(&store, form("taken")).unwrap();

    let again = SignupForm {
        email: "someone-else@example.com".to_string(),
        ..form("TAKEN")
    };
    assert!(matches!(signup(&store, again), Err(StoreError::Conflict(_))));
}

#[test]
fn test_login_invalid_credentials() {
    let (store, _clock) = fresh_store();
    signup(&store, form("known")).unwrap();
    logout(&store).unwrap();

    assert!(matches!(
        login(&store, "nonexistent_user", "wrongpass"),
        Err(StoreError::Unauthorized)
    ));
    assert!(matches!(
        login(&store, "known", "wrongpass"),
        Err(StoreError::Unauthorized)
    ));
    assert!(matches!(login(&store, "", "x"), Err(StoreError::Invalid(_))));
    assert!(!store.is_logged_in().unwrap());

    let session = login(&store, "KNOWN", "correct-horse").unwrap();
    assert_eq!(session.username, "known");
}
