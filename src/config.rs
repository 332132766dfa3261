pub const DEFAULT_KEY_PREFIX: &str = "batform_";
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;
pub const DEFAULT_MAX_POST_LENGTH: usize = 5000;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

// Collection names, stored under `<prefix><name>`
pub const USERS_KEY: &str = "users";
pub const CURRENT_USER_KEY: &str = "currentUser";
pub const POSTS_KEY: &str = "posts";
pub const COMMENTS_KEY: &str = "comments";
pub const LIKES_KEY: &str = "likes";
pub const FOLLOWS_KEY: &str = "follows";
pub const NOTIFICATIONS_KEY: &str = "notifications";
pub const SAVED_POSTS_KEY: &str = "savedPosts";

pub const ALL_KEYS: [&str; 8] = [
    USERS_KEY,
    CURRENT_USER_KEY,
    POSTS_KEY,
    COMMENTS_KEY,
    LIKES_KEY,
    FOLLOWS_KEY,
    NOTIFICATIONS_KEY,
    SAVED_POSTS_KEY,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub key_prefix: String,
    pub min_password_length: usize,
    pub max_post_length: usize,
    pub suggestion_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            max_post_length: DEFAULT_MAX_POST_LENGTH,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl StoreConfig {
    /// Reads overrides from `BATFORM_*` environment variables, keeping the
    /// default for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = StoreConfig::default();
        StoreConfig {
            key_prefix: std::env::var("BATFORM_KEY_PREFIX")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.key_prefix),
            min_password_length: env_usize("BATFORM_MIN_PASSWORD_LENGTH")
                .unwrap_or(defaults.min_password_length),
            max_post_length: env_usize("BATFORM_MAX_POST_LENGTH")
                .unwrap_or(defaults.max_post_length),
            suggestion_limit: env_usize("BATFORM_SUGGESTION_LIMIT")
                .unwrap_or(defaults.suggestion_limit),
        }
    }

    pub fn key(&self, name: &str) -> String {
        format!("{}{}", self.key_prefix, name)
    }
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
}
