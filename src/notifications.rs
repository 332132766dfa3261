use crate::config::NOTIFICATIONS_KEY;
use crate::core::db::Store;
use crate::core::errors::StoreResult;
use crate::core::helpers::generate_id;
use crate::core::kv::KeyValue;
use crate::models::models::{NewNotification, Notification};

impl<K: KeyValue> Store<K> {
    pub fn get_notifications(&self) -> StoreResult<Vec<Notification>> {
        self.load(NOTIFICATIONS_KEY)
    }

    pub fn create_notification(&self, new: NewNotification) -> StoreResult<Notification> {
        let notification = Notification {
            id: generate_id(),
            user_id: new.user_id,
            kind: new.kind,
            from_user_id: new.from_user_id,
            post_id: new.post_id,
            read: false,
            created_at: self.now(),
        };

        let mut notifications = self.get_notifications()?;
        notifications.insert(0, notification.clone());
        self.save(NOTIFICATIONS_KEY, &notifications)?;

        Ok(notification)
    }

    /// Notifications addressed to `user_id`, newest first.
    pub fn get_user_notifications(&self, user_id: &str) -> StoreResult<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .get_notifications()?
            .into_iter()
            .filter(|n| n.user_id == user_id)
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    /// Unknown ids are ignored.
    pub fn mark_notification_read(&self, notification_id: &str) -> StoreResult<()> {
        let mut notifications = self.get_notifications()?;
        if let Some(n) = notifications.iter_mut().find(|n| n.id == notification_id) {
            n.read = true;
            self.save(NOTIFICATIONS_KEY, &notifications)?;
        }
        Ok(())
    }

    pub fn mark_all_notifications_read(&self, user_id: &str) -> StoreResult<usize> {
        let mut notifications = self.get_notifications()?;
        let mut marked = 0;
        for n in notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.read)
        {
            n.read = true;
            marked += 1;
        }
        if marked > 0 {
            self.save(NOTIFICATIONS_KEY, &notifications)?;
        }
        Ok(marked)
    }

    pub fn get_unread_notification_count(&self, user_id: &str) -> StoreResult<usize> {
        Ok(self
            .get_notifications()?
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .count())
    }
}
