//! Shared storage for character descriptions.
//!
//! Many mobs spawned from one template carry the same long description. A
//! [`DescriptionCache`] stores each distinct text once; characters keep a
//! short reference (`h:` followed by the SHA-256 of the text) instead.
//!
//! The cache is append-only and safe to share across threads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use sha2::{Digest, Sha256};

/// Prefix marking a description stored in a [`DescriptionCache`].
pub const REFERENCE_PREFIX: &str = "h:";

#[derive(Debug, Default)]
pub struct DescriptionCache {
    entries: Mutex<HashMap<String, Arc<str>>>,
}

impl DescriptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `text` (if new) and returns the reference to keep in its place.
    ///
    /// Text that already is a reference is returned unchanged.
    pub fn intern(&self, text: &str) -> String {
        if is_reference(text) {
            return text.to_string();
        }
        let key = hex::encode(Sha256::digest(text.as_bytes()));
        self.lock()
            .entry(key.clone())
            .or_insert_with(|| Arc::from(text));
        format!("{REFERENCE_PREFIX}{key}")
    }

    /// Text for a stored description.
    ///
    /// Plain text is returned as is. A reference this cache does not know
    /// resolves to an empty string.
    pub fn resolve(&self, stored: &str) -> Arc<str> {
        if !is_reference(stored) {
            return Arc::from(stored);
        }
        let key = &stored[REFERENCE_PREFIX.len()..];
        self.lock().get(key).cloned().unwrap_or_else(|| Arc::from(""))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Entries are inserted whole; a poisoned map is still consistent.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<str>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn is_reference(text: &str) -> bool {
    text.strip_prefix(REFERENCE_PREFIX)
        .is_some_and(|key| key.len() == 64 && key.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_share_one_entry() {
        let cache = DescriptionCache::new();
        let a = cache.intern("A scruffy rat.");
        let b = cache.intern("A scruffy rat.");
        let c = cache.intern("A sleek cat.");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(cache.len(), 2);
        assert_eq!(&*cache.resolve(&a), "A scruffy rat.");
    }

    #[test]
    fn plain_text_and_unknown_references() {
        let cache = DescriptionCache::new();
        assert_eq!(&*cache.resolve("just text"), "just text");
        assert_eq!(&*cache.resolve("h:ello"), "h:ello");

        let foreign = format!("{REFERENCE_PREFIX}{}", "0".repeat(64));
        assert!(is_reference(&foreign));
        assert_eq!(&*cache.resolve(&foreign), "");
        assert_eq!(cache.intern(&foreign), foreign);
        assert!(cache.is_empty());
    }

    #[test]
    fn survives_a_poisoned_lock() {
        let cache = Arc::new(DescriptionCache::new());
        let key = cache.intern("before");

        let poisoner = Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.lock().unwrap();
            panic!("poison the cache");
        })
        .join();

        assert_eq!(&*cache.resolve(&key), "before");
        cache.intern("after");
        assert_eq!(cache.len(), 2);
    }
}
