use crate::config::USERS_KEY;
use crate::core::db::Store;
use crate::core::errors::{StoreError, StoreResult};
use crate::core::helpers::{eq_ignore_case, generate_id, hash_password, verify_password};
use crate::core::kv::KeyValue;
use crate::models::models::{NewUser, User, UserUpdate};

impl<K: KeyValue> Store<K> {
    /// All users in creation order.
    pub fn get_users(&self) -> StoreResult<Vec<User>> {
        self.load(USERS_KEY)
    }

    pub fn get_user_by_id(&self, user_id: &str) -> StoreResult<Option<User>> {
        Ok(self.get_users()?.into_iter().find(|u| u.id == user_id))
    }

    pub fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .get_users()?
            .into_iter()
            .find(|u| eq_ignore_case(&u.username, username)))
    }

    pub fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .get_users()?
            .into_iter()
            .find(|u| eq_ignore_case(&u.email, email)))
    }

    /// Appends a new user. Username and email must not already be taken by
    /// any user, compared case-insensitively.
    pub fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut users = self.get_users()?;
        ensure_unique(
            &users,
            None,
            Some(new_user.username.as_str()),
            Some(new_user.email.as_str()),
        )?;

        let user = User {
            id: generate_id(),
            full_name: new_user
                .full_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| new_user.username.clone()),
            username: new_user.username,
            email: new_user.email,
            password: hash_password(&new_user.password)?,
            avatar: new_user.avatar,
            cover_photo: None,
            bio: String::new(),
            location: String::new(),
            website: String::new(),
            created_at: self.now(),
        };

        users.push(user.clone());
        self.save(USERS_KEY, &users)?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Shallow merge of `updates` into the stored user. Returns `None` if no
    /// user has `user_id`. Refreshes the session snapshot when the updated
    /// user is the one logged in.
    pub fn update_user(&self, user_id: &str, updates: UserUpdate) -> StoreResult<Option<User>> {
        let mut users = self.get_users()?;
        let Some(index) = users.iter().position(|u| u.id == user_id) else {
            return Ok(None);
        };
        ensure_unique(
            &users,
            Some(user_id),
            updates.username.as_deref(),
            updates.email.as_deref(),
        )?;

        let session = self.get_current_user()?;

        let user = &mut users[index];
        if let Some(username) = updates.username {
            user.username = username;
        }
        if let Some(email) = updates.email {
            user.email = email;
        }
        if let Some(password) = updates.password {
            user.password = hash_password(&password)?;
        }
        if let Some(full_name) = updates.full_name {
            user.full_name = full_name;
        }
        if let Some(avatar) = updates.avatar {
            user.avatar = avatar;
        }
        if let Some(cover_photo) = updates.cover_photo {
            user.cover_photo = cover_photo;
        }
        if let Some(bio) = updates.bio {
            user.bio = bio;
        }
        if let Some(location) = updates.location {
            user.location = location;
        }
        if let Some(website) = updates.website {
            user.website = website;
        }

        let updated = user.clone();
        self.save(USERS_KEY, &users)?;

        if session.is_some_and(|current| current.id == user_id) {
            self.set_current_user(&updated)?;
        }

        Ok(Some(updated))
    }

    pub fn verify_password(&self, user: &User, password: &str) -> bool {
        verify_password(password, &user.password)
    }
}

fn ensure_unique(
    users: &[User],
    except_id: Option<&str>,
    username: Option<&str>,
    email: Option<&str>,
) -> StoreResult<()> {
    let others = users.iter().filter(|u| Some(u.id.as_str()) != except_id);
    for other in others {
        if let Some(username) = username {
            if eq_ignore_case(&other.username, username) {
                return Err(StoreError::Conflict("Username already taken".to_string()));
            }
        }
        if let Some(email) = email {
            if eq_ignore_case(&other.email, email) {
                return Err(StoreError::Conflict("Email already registered".to_string()));
            }
        }
    }
    Ok(())
}
