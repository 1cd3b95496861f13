//! In-memory API key store.
//!
//! Keys are kept in insertion order in a `Vec` and looked up by linear scan.
//! Nothing is persisted; data is lost on restart.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::api_key::{ApiKey, NewApiKey, format_content};

/// Key store shared between request handlers.
///
/// Readers (find, list) take the shared lock, writers (create, delete,
/// archive, authenticate) the exclusive one. The lock is held for a single
/// store call only.
pub type SharedStore = Arc<RwLock<KeyStore>>;

/// User ids of the demo keys, in id order starting at 1.
const SEED_USER_IDS: [i64; 7] = [17, 17, 18, 20, 20, 17, 19];

/// Filter applied by [`KeyStore::list_filtered`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyFilter {
    /// Raw `user_id` query value, kept unparsed
    pub user_id: Option<String>,
}

impl KeyFilter {
    /// Build a filter from decoded query pairs. When `user_id` appears more
    /// than once the first value wins.
    pub fn from_query_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let user_id = pairs
            .into_iter()
            .find(|(key, _)| key == "user_id")
            .map(|(_, value)| value);

        Self { user_id }
    }

    pub fn by_user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
        }
    }

    /// The user id to filter on.
    ///
    /// A value that is not an integer means "no filter", not an error.
    pub fn user_id(&self) -> Option<i64> {
        self.user_id.as_deref()?.parse().ok()
    }
}

/// Ordered collection of API keys plus the id counter.
#[derive(Debug)]
pub struct KeyStore {
    keys: Vec<ApiKey>,
    next_id: i64,
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStore {
    /// An empty store whose first key gets id 1.
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            next_id: 1,
        }
    }

    /// A store holding `keys` in the given order. The counter starts above
    /// the highest id present so no id is ever handed out twice.
    pub fn with_keys(keys: Vec<ApiKey>) -> Self {
        let next_id = keys.iter().map(|key| key.id).max().map_or(1, |max| max + 1);
        Self { keys, next_id }
    }

    /// The seven demo keys: ids 1 to 7, no timestamps set.
    pub fn seeded() -> Self {
        let keys = SEED_USER_IDS
            .iter()
            .zip(1..)
            .map(|(&user_id, id)| ApiKey::new(id, user_id))
            .collect();

        Self::with_keys(keys)
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Id the next created key will receive.
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    pub fn find_by_id(&self, id: i64) -> Option<&ApiKey> {
        self.keys.iter().find(|key| key.id == id)
    }

    pub fn find_by_content(&self, content: &str) -> Option<&ApiKey> {
        self.keys.iter().find(|key| key.content == content)
    }

    /// Keys matching `filter`, in insertion order.
    ///
    /// Without a usable `user_id` every key is returned.
    pub fn list_filtered(&self, filter: &KeyFilter) -> Vec<ApiKey> {
        match filter.user_id() {
            Some(user_id) => self
                .keys
                .iter()
                .filter(|key| key.user_id == user_id)
                .cloned()
                .collect(),
            None => self.keys.clone(),
        }
    }

    /// Append a new key and return it.
    ///
    /// Id, content and creation time are always assigned here.
    pub fn create(&mut self, new_key: NewApiKey) -> ApiKey {
        let id = self.next_id;
        let key = ApiKey {
            id,
            user_id: new_key.user_id,
            content: format_content(id),
            created_at: Some(Utc::now()),
            last_used_at: new_key.last_used_at,
            archived_at: new_key.archived_at,
        };

        self.keys.push(key.clone());
        self.next_id += 1;
        key
    }

    /// Remove the key with `id`, keeping the others in order.
    pub fn delete(&mut self, id: i64) -> bool {
        match self.position_by_id(id) {
            Some(index) => {
                self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    /// Stamp the key with `id` as archived. Archiving again moves the
    /// timestamp forward.
    pub fn archive(&mut self, id: i64) -> bool {
        match self.keys.iter_mut().find(|key| key.id == id) {
            Some(key) => {
                key.archived_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    /// Stamp the key whose content is `content` as just used.
    pub fn touch_last_used(&mut self, content: &str) -> bool {
        match self.keys.iter_mut().find(|key| key.content == content) {
            Some(key) => {
                key.last_used_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    fn position_by_id(&self, id: i64) -> Option<usize> {
        self.keys.iter().position(|key| key.id == id)
    }
}
