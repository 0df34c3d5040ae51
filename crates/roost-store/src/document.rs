use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use roost_types::models::{Chirp, RefreshToken, User};

/// The single persisted aggregate: every collection plus its id counter,
/// serialized as one JSON object (integer map keys become decimal strings on
/// the wire).
///
/// Nothing here relies on map iteration order; ordered views sort
/// explicitly. Ids come from the stored counters and are never reused, even
/// after deletes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub chirps: HashMap<u64, Chirp>,
    pub users: HashMap<u64, User>,
    pub emails: HashMap<String, u64>,
    pub refresh_tokens: HashMap<String, RefreshToken>,
    pub chirp_id: u64,
    pub user_id: u64,
}

impl Document {
    /// Allocate the next user id, insert the account, and index its email.
    /// Callers check email uniqueness first.
    pub fn create_user(&mut self, email: &str, password_hash: String) -> &User {
        self.user_id += 1;
        let id = self.user_id;
        self.emails.insert(email.to_owned(), id);
        self.users.entry(id).or_insert(User {
            id,
            email: email.to_owned(),
            password_hash,
            is_privileged: false,
        })
    }

    /// Replace a user's email and password hash in place. When the email
    /// changes, the old index key is removed before the new one is inserted
    /// so no stale key survives the critical section. The privileged flag is
    /// untouched.
    pub fn update_user_credentials(
        &mut self,
        id: u64,
        email: &str,
        password_hash: String,
    ) -> Option<&User> {
        let user = self.users.get_mut(&id)?;
        if user.email != email {
            self.emails.remove(&user.email);
            self.emails.insert(email.to_owned(), id);
            user.email = email.to_owned();
        }
        user.password_hash = password_hash;
        Some(&*user)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.emails.get(email).and_then(|id| self.users.get(id))
    }

    /// Allocate the next chirp id and insert the post.
    pub fn create_chirp(&mut self, author_id: u64, body: String) -> &Chirp {
        self.chirp_id += 1;
        let id = self.chirp_id;
        self.chirps.entry(id).or_insert(Chirp {
            id,
            body,
            author_id,
        })
    }

    /// All chirps in ascending id order.
    pub fn chirps_sorted(&self) -> Vec<Chirp> {
        let mut chirps: Vec<Chirp> = self.chirps.values().cloned().collect();
        chirps.sort_by_key(|c| c.id);
        chirps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_index_tracks_every_live_user() {
        let mut doc = Document::default();
        let alice = doc.create_user("alice@example.com", "h1".into()).id;
        let bob = doc.create_user("bob@example.com", "h2".into()).id;

        doc.update_user_credentials(alice, "alice@rewired.net", "h3".into())
            .unwrap();

        assert_eq!(doc.emails.get("alice@rewired.net"), Some(&alice));
        assert_eq!(doc.emails.get("bob@example.com"), Some(&bob));
        assert!(!doc.emails.contains_key("alice@example.com"));
        for user in doc.users.values() {
            assert_eq!(doc.emails.get(&user.email), Some(&user.id));
        }
    }

    #[test]
    fn unchanged_email_keeps_its_index_entry() {
        let mut doc = Document::default();
        let id = doc.create_user("carol@example.com", "h1".into()).id;
        doc.update_user_credentials(id, "carol@example.com", "h2".into())
            .unwrap();

        assert_eq!(doc.emails.get("carol@example.com"), Some(&id));
        assert_eq!(doc.users[&id].password_hash, "h2");
    }

    #[test]
    fn privileged_flag_survives_credential_update() {
        let mut doc = Document::default();
        let id = doc.create_user("dave@example.com", "h1".into()).id;
        doc.users.get_mut(&id).unwrap().is_privileged = true;

        let user = doc
            .update_user_credentials(id, "dave@elsewhere.com", "h2".into())
            .unwrap();
        assert!(user.is_privileged);
    }

    #[test]
    fn chirp_ids_are_never_reused_after_delete() {
        let mut doc = Document::default();
        doc.create_chirp(1, "one".into());
        let second = doc.create_chirp(1, "two".into()).id;
        doc.chirps.remove(&second);

        let third = doc.create_chirp(1, "three".into()).id;
        assert_eq!(third, second + 1);

        let ids: Vec<u64> = doc.chirps_sorted().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn sorted_view_is_ascending_regardless_of_insertion() {
        let mut doc = Document::default();
        // Insert out of order straight into the map.
        for id in [5u64, 1, 3] {
            doc.chirps.insert(
                id,
                Chirp {
                    id,
                    body: format!("chirp {id}"),
                    author_id: 1,
                },
            );
        }
        let ids: Vec<u64> = doc.chirps_sorted().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
