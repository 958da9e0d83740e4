//! # Secret Store
//!
//! Take-on-read storage. A secret is put once and can be taken once; the take removes
//! it, so a shared link stops working after its first use.

use crate::ids::SecretKey;
use dashmap::DashMap;
use tracing::debug;

/// Which intake produced a secret. Decides how it is read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intake {
    /// Raw body posted to `/`
    Plain,
    /// Multipart form posted to `/api/content`
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    pub intake: Intake,
    pub text: Vec<u8>,
    pub file: Option<StoredFile>,
}

impl Secret {
    pub fn plain(text: impl Into<Vec<u8>>) -> Self {
        Self {
            intake: Intake::Plain,
            text: text.into(),
            file: None,
        }
    }

    pub fn content(text: impl Into<Vec<u8>>, file: Option<StoredFile>) -> Self {
        Self {
            intake: Intake::Content,
            text: text.into(),
            file,
        }
    }

    /// Total stored bytes, text plus attachment.
    pub fn size(&self) -> usize {
        self.text.len() + self.file.as_ref().map_or(0, |f| f.bytes.len())
    }
}

pub trait SecretStore: Send + Sync {
    /// Store `secret` under a fresh key.
    fn put(&self, secret: Secret) -> SecretKey;
    /// Remove and return the secret; `None` if it never existed or was already taken.
    fn take(&self, key: &SecretKey) -> Option<Secret>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store on a sharded concurrent map. Contents die with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<SecretKey, Secret>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemoryStore {
    fn put(&self, secret: Secret) -> SecretKey {
        let key = SecretKey::new();
        debug!(key = %key, bytes = secret.size(), "secret stored");
        self.entries.insert(key, secret);
        key
    }

    fn take(&self, key: &SecretKey) -> Option<Secret> {
        let taken = self.entries.remove(key).map(|(_, secret)| secret);
        debug!(key = %key, found = taken.is_some(), "secret taken");
        taken
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_take_is_one_shot() {
        let store = MemoryStore::new();
        let key = store.put(Secret::plain("hunter2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.take(&key), Some(Secret::plain("hunter2")));
        assert_eq!(store.take(&key), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_key() {
        let store = MemoryStore::new();
        assert_eq!(store.take(&SecretKey::new()), None);
    }

    #[test]
    fn test_keys_are_distinct() {
        let store = MemoryStore::new();
        let a = store.put(Secret::plain("a"));
        let b = store.put(Secret::plain("b"));
        assert_ne!(a, b);
        assert_eq!(store.take(&b).map(|s| s.text), Some(b"b".to_vec()));
        assert_eq!(store.take(&a).map(|s| s.text), Some(b"a".to_vec()));
    }

    #[test]
    fn test_concurrent_take_yields_one_winner() {
        let store = Arc::new(MemoryStore::new());
        let key = store.put(Secret::content(
            "t",
            Some(StoredFile {
                name: "f.txt".into(),
                bytes: vec![1, 2, 3],
            }),
        ));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.take(&key).is_some())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn test_size_counts_attachment() {
        let s = Secret::content(
            "abc",
            Some(StoredFile {
                name: "x".into(),
                bytes: vec![0; 10],
            }),
        );
        assert_eq!(s.size(), 13);
    }
}
