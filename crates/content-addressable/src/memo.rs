//! Memo: a tamper-evident key-value container.
//!
//! Every write records the content identifier of the value; every checked
//! read recomputes it and fails with [`ContentError::Tamper`] on mismatch.
//!
//! ## Limits of copy-on-read
//!
//! [`Memo::get`] returns a clone, so editing the returned value never touches
//! the stored one. That does not protect against a mutable reference obtained
//! earlier through [`Memo::get_unchecked_mut`]: edits made through it land in
//! the stored value without refreshing its identifier. Such edits are exactly
//! what the next checked read reports as tampering.

use indexmap::IndexMap;
use std::fmt;

use content_addressable_core::{Cid, CidCache, CidOptions, Content, ContentError, Result, Value};

/// A stored value and the identifier recorded when it was written.
#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    cid: Cid,
}

/// An insertion-ordered map that verifies values against their identifiers.
///
/// Each memo owns its identifier table; nothing is shared between instances.
/// The container is not internally synchronized: share it behind a lock.
///
/// To copy a memo, use [`Memo::duplicate`], which recomputes every
/// identifier. `clone()` carries recorded identifiers over unchanged.
///
/// ```
/// use content_addressable::{Memo, Value};
///
/// let mut memo = Memo::new();
/// memo.set("foo", Value::from("bar")).unwrap();
/// assert_eq!(memo.get("foo").unwrap(), Some(Value::from("bar")));
///
/// // Out-of-band edit: the next checked read catches it.
/// *memo.get_unchecked_mut("foo").unwrap() = Value::from("baz");
/// assert!(memo.get("foo").unwrap_err().is_tamper());
/// ```
#[derive(Debug)]
pub struct Memo<V = Value> {
    entries: IndexMap<String, Entry<V>>,
    cids: CidCache,
}

impl<V: Content + Clone> Memo<V> {
    /// An empty memo using the default identifier options.
    pub fn new() -> Self {
        Self::with_cache(CidCache::default())
    }

    /// An empty memo computing identifiers with `options`.
    pub fn with_options(options: CidOptions) -> Self {
        Self::with_cache(CidCache::disabled(options))
    }

    /// An empty memo computing identifiers through `cache`.
    pub fn with_cache(cache: CidCache) -> Self {
        Self {
            entries: IndexMap::new(),
            cids: cache,
        }
    }

    /// Build a memo from key/value pairs, recording each identifier.
    pub fn create<I, K>(data: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        Self::create_with(CidOptions::default(), data)
    }

    /// [`Memo::create`] with identifiers computed under `options`.
    pub fn create_with<I, K>(options: CidOptions, data: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let mut memo = Self::with_options(options);
        for (key, value) in data {
            memo.set(key, value)?;
        }
        Ok(memo)
    }

    /// The options identifiers are computed with.
    pub fn options(&self) -> &CidOptions {
        self.cids.options()
    }

    /// Store `value` under `key`, recording its identifier.
    ///
    /// Overwrites any previous entry, including one that had been tampered
    /// with. If the identifier cannot be computed nothing is stored.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Result<()> {
        let key = key.into();
        let cid = self.cids.cid_of(&value)?;
        tracing::debug!(key = %key, cid = %cid, "recorded content identifier");
        self.entries.insert(key, Entry { value, cid });
        Ok(())
    }

    /// Verified read: a clone of the value under `key`.
    ///
    /// Returns `Ok(None)` for a missing key and [`ContentError::Tamper`]
    /// when the stored value no longer matches its recorded identifier.
    pub fn get(&self, key: &str) -> Result<Option<V>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.check(key, entry)?;
                Ok(Some(entry.value.clone()))
            }
            None => Ok(None),
        }
    }

    /// Remove `key` without verifying it. Remaining keys keep their order.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let removed = self.entries.shift_remove(key).map(|entry| entry.value);
        if removed.is_some() {
            tracing::trace!(key = %key, "deleted entry");
        }
        removed
    }

    /// Verify, edit in place, and re-record the identifier in one step.
    ///
    /// Returns `Ok(false)` if `key` is absent. A tampered entry is refused
    /// rather than laundered into a fresh identifier; use [`Memo::set`] to
    /// overwrite it deliberately.
    pub fn update<F>(&mut self, key: &str, f: F) -> Result<bool>
    where
        F: FnOnce(&mut V),
    {
        let Some(entry) = self.entries.get(key) else {
            return Ok(false);
        };
        self.check(key, entry)?;

        let mut value = entry.value.clone();
        f(&mut value);
        let cid = self.cids.cid_of(&value)?;
        tracing::debug!(key = %key, cid = %cid, "recorded content identifier");

        if let Some(entry) = self.entries.get_mut(key) {
            *entry = Entry { value, cid };
        }
        Ok(true)
    }

    /// Raw mutable access that does **not** refresh the identifier.
    ///
    /// Any change made through the returned reference is reported by the
    /// next checked read until the key is rewritten with [`Memo::set`].
    pub fn get_unchecked_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key).map(|entry| &mut entry.value)
    }

    /// The identifier recorded for `key` at its last write.
    pub fn recorded_cid(&self, key: &str) -> Option<&Cid> {
        self.entries.get(key).map(|entry| &entry.cid)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order. No verification.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys and values in insertion order. No verification.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.as_str(), &entry.value))
    }

    /// Verify every entry, failing on the first tampered key.
    pub fn verify_all(&self) -> Result<()> {
        for (key, entry) in &self.entries {
            self.check(key, entry)?;
        }
        Ok(())
    }

    /// Keys whose values no longer match their identifiers.
    pub fn tampered_keys(&self) -> Result<Vec<String>> {
        let mut tampered = Vec::new();
        for (key, entry) in &self.entries {
            match self.check(key, entry) {
                Ok(()) => {}
                Err(ContentError::Tamper { .. }) => tampered.push(key.clone()),
                Err(e) => return Err(e),
            }
        }
        Ok(tampered)
    }

    /// An independent copy whose identifiers are recomputed from the copied
    /// values rather than carried over.
    pub fn duplicate(&self) -> Result<Self> {
        let mut copy = Self::with_cache(self.cids.fresh());
        for (key, entry) in &self.entries {
            copy.set(key.clone(), entry.value.clone())?;
        }
        Ok(copy)
    }

    /// Identifier of the whole memo under its own options.
    ///
    /// [`Content::cid`] always uses the defaults; this follows whatever the
    /// memo was built with.
    pub fn content_id(&self) -> Result<Cid> {
        self.options().cid_of(self)
    }

    fn check(&self, key: &str, entry: &Entry<V>) -> Result<()> {
        let actual = self.cids.cid_of(&entry.value)?;
        if actual != entry.cid {
            tracing::warn!(
                key = %key,
                recorded = %entry.cid,
                actual = %actual,
                "value tampering detected"
            );
            return Err(ContentError::Tamper {
                key: key.to_string(),
                recorded: entry.cid.clone(),
                actual,
            });
        }
        Ok(())
    }
}

impl<V: Content + Clone> Default for Memo<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The memo's data is its key -> value mapping, without identifiers.
impl<V: Content + Clone> Content for Memo<V> {
    fn to_data(&self) -> Result<Value> {
        let entries = self
            .entries
            .iter()
            .map(|(key, entry)| Ok((Value::Text(key.clone()), entry.value.to_data()?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Map(entries))
    }
}

/// Renders the memo's identifier, or the reason it has none.
impl<V: Content + Clone> fmt::Display for Memo<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.content_id() {
            Ok(cid) => write!(f, "{}", cid),
            Err(e) => write!(f, "<{}>", e),
        }
    }
}

/// A field-for-field copy, recorded identifiers included.
///
/// This is not the verifiable copy: a clone inherits whatever the source
/// recorded, tampered entries included, so it still fails exactly where the
/// source fails. [`Memo::duplicate`] is the copy whose identifiers are
/// re-derived from the values. `Clone` exists so memos can be nested as
/// values of other memos.
impl<V: Clone> Clone for Memo<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            cids: self.cids.fresh(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_addressable_core::{cid_of, Algorithm, ErrorKind};

    fn sample_entries() -> Vec<(&'static str, Value)> {
        vec![
            ("foo", Value::from("bar")),
            ("data", Value::map([("safe", true)])),
        ]
    }

    fn sample() -> Memo {
        Memo::create(sample_entries()).unwrap()
    }

    #[test]
    fn test_set_then_get() {
        let mut memo = Memo::new();
        memo.set("foo", Value::from("bar")).unwrap();
        assert_eq!(memo.get("foo").unwrap(), Some(Value::from("bar")));
        assert_eq!(memo.recorded_cid("foo"), Some(&cid_of(&Value::from("bar")).unwrap()));
    }

    #[test]
    fn test_missing_key() {
        let memo = sample();
        assert_eq!(memo.get("missing").unwrap(), None);
        assert!(memo.recorded_cid("missing").is_none());
    }

    #[test]
    fn test_tamper_detected_on_internal_edit() {
        let mut memo = sample();
        // reach into the table directly, bypassing every accessor
        memo.entries.get_mut("foo").unwrap().value = Value::from("bad");

        let err = memo.get("foo").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Tamper);
        match err {
            ContentError::Tamper {
                key,
                recorded,
                actual,
            } => {
                assert_eq!(key, "foo");
                assert_eq!(recorded, cid_of(&Value::from("bar")).unwrap());
                assert_eq!(actual, cid_of(&Value::from("bad")).unwrap());
            }
            other => panic!("expected tamper, got {:?}", other),
        }

        // other keys are unaffected
        assert!(memo.get("data").unwrap().is_some());
    }

    #[test]
    fn test_nested_tamper_detected() {
        let mut memo = sample();
        let data = memo.get_unchecked_mut("data").unwrap();
        *data.get_mut("safe").unwrap() = Value::Bool(false);

        assert!(memo.get("data").unwrap_err().is_tamper());
    }

    #[test]
    fn test_returned_clone_is_detached() {
        let memo = sample();
        let mut data = memo.get("data").unwrap().unwrap();
        *data.get_mut("safe").unwrap() = Value::Bool(false);

        let stored = memo.get("data").unwrap().unwrap();
        assert_eq!(stored.get("safe").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_set_heals() {
        let mut memo = sample();
        *memo.get_unchecked_mut("foo").unwrap() = Value::from("bad");
        assert!(memo.get("foo").is_err());

        memo.set("foo", Value::from("good")).unwrap();
        assert_eq!(memo.get("foo").unwrap(), Some(Value::from("good")));
    }

    #[test]
    fn test_delete_skips_verification() {
        let mut memo = sample();
        *memo.get_unchecked_mut("foo").unwrap() = Value::from("bad");

        assert_eq!(memo.delete("foo"), Some(Value::from("bad")));
        assert_eq!(memo.len(), 1);
        assert!(!memo.contains_key("foo"));
        assert!(memo.recorded_cid("foo").is_none());
        assert_eq!(memo.delete("foo"), None);
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut memo = Memo::create([
            ("a", Value::Integer(1)),
            ("b", Value::Integer(2)),
            ("c", Value::Integer(3)),
        ])
        .unwrap();
        memo.delete("a");
        assert_eq!(memo.keys().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_iteration_skips_verification() {
        let mut memo = sample();
        *memo.get_unchecked_mut("foo").unwrap() = Value::from("bad");

        assert_eq!(memo.len(), 2);
        assert_eq!(memo.keys().collect::<Vec<_>>(), vec!["foo", "data"]);
        assert_eq!(memo.iter().count(), 2);
    }

    #[test]
    fn test_update_rerecords() {
        let mut memo = sample();
        let updated = memo
            .update("data", |v| *v.get_mut("safe").unwrap() = Value::Bool(false))
            .unwrap();
        assert!(updated);

        let data = memo.get("data").unwrap().unwrap();
        assert_eq!(data.get("safe").and_then(Value::as_bool), Some(false));
        assert!(!memo.update("missing", |_| {}).unwrap());
    }

    #[test]
    fn test_update_refuses_tampered() {
        let mut memo = sample();
        *memo.get_unchecked_mut("foo").unwrap() = Value::from("bad");

        assert!(memo.update("foo", |_| {}).unwrap_err().is_tamper());
        assert!(memo.get("foo").is_err());
    }

    #[test]
    fn test_failed_set_stores_nothing() {
        let mut memo = sample();
        let err = memo.set("nan", Value::Float(f64::NAN)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert!(!memo.contains_key("nan"));

        // an existing entry survives a failed overwrite
        assert!(memo.set("foo", Value::Float(f64::INFINITY)).is_err());
        assert_eq!(memo.get("foo").unwrap(), Some(Value::from("bar")));
    }

    #[test]
    fn test_verify_all_and_tampered_keys() {
        let mut memo = sample();
        memo.verify_all().unwrap();
        assert!(memo.tampered_keys().unwrap().is_empty());

        *memo.get_unchecked_mut("data").unwrap() = Value::Null;
        assert!(memo.verify_all().unwrap_err().is_tamper());
        assert_eq!(memo.tampered_keys().unwrap(), vec!["data".to_string()]);
    }

    #[test]
    fn test_instances_do_not_share_identifiers() {
        let mut a = Memo::new();
        let mut b = Memo::new();
        a.set("k", Value::from("a")).unwrap();
        b.set("k", Value::from("b")).unwrap();

        assert_eq!(a.get("k").unwrap(), Some(Value::from("a")));
        assert_eq!(b.get("k").unwrap(), Some(Value::from("b")));
        assert_ne!(a.recorded_cid("k"), b.recorded_cid("k"));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut memo = sample();
        let dup = memo.duplicate().unwrap();
        assert_eq!(memo.cid().unwrap(), dup.cid().unwrap());
        dup.verify_all().unwrap();

        *memo.get_unchecked_mut("foo").unwrap() = Value::from("bad");
        assert_eq!(dup.get("foo").unwrap(), Some(Value::from("bar")));
        assert_eq!(dup.recorded_cid("foo"), Some(&cid_of(&Value::from("bar")).unwrap()));
    }

    #[test]
    fn test_duplicate_rederives_identifiers() {
        let mut memo = sample();
        // corrupt the recorded identifier rather than the value
        memo.entries.get_mut("foo").unwrap().cid = cid_of(&Value::Null).unwrap();
        assert!(memo.get("foo").is_err());

        let dup = memo.duplicate().unwrap();
        assert_eq!(dup.get("foo").unwrap(), Some(Value::from("bar")));
    }

    #[test]
    fn test_clone_keeps_recorded_identifiers() {
        let mut memo = sample();
        memo.entries.get_mut("foo").unwrap().cid = cid_of(&Value::Null).unwrap();

        // the clone fails where the source fails
        let cloned = memo.clone();
        assert!(cloned.get("foo").unwrap_err().is_tamper());
        assert_eq!(cloned.tampered_keys().unwrap(), vec!["foo".to_string()]);

        // the duplicate is verifiable from scratch
        let dup = memo.duplicate().unwrap();
        dup.verify_all().unwrap();
        assert_eq!(dup.recorded_cid("foo"), Some(&cid_of(&Value::from("bar")).unwrap()));
    }

    #[test]
    fn test_to_data_and_cid() {
        let memo = sample();
        let data = memo.to_data().unwrap();
        assert_eq!(
            data,
            Value::map([
                ("foo", Value::from("bar")),
                ("data", Value::map([("safe", true)])),
            ])
        );
        assert_eq!(memo.cid().unwrap(), cid_of(&data).unwrap());
        assert_eq!(memo.as_list().unwrap(), vec![data]);
    }

    #[test]
    fn test_memo_cid_ignores_insertion_order() {
        let a = Memo::create([("x", Value::Integer(1)), ("y", Value::Integer(2))]).unwrap();
        let b = Memo::create([("y", Value::Integer(2)), ("x", Value::Integer(1))]).unwrap();
        assert_eq!(a.cid().unwrap(), b.cid().unwrap());
    }

    #[test]
    fn test_with_options() {
        let mut memo: Memo = Memo::with_options(CidOptions::for_algorithm(Algorithm::Blake3));
        memo.set("foo", Value::from("bar")).unwrap();
        let recorded = memo.recorded_cid("foo").unwrap();
        assert_eq!(recorded.decode().unwrap().function_name, "blake3");
        assert_eq!(memo.options().encoding, "blake3");

        let dup = memo.duplicate().unwrap();
        assert_eq!(dup.recorded_cid("foo"), Some(recorded));
    }

    #[test]
    fn test_create_with_options() {
        let options = CidOptions::for_algorithm(Algorithm::Sha2_256).truncated(12);
        let memo: Memo =
            Memo::create_with(options.clone(), [("foo", Value::from("bar"))]).unwrap();

        let recorded = memo.recorded_cid("foo").unwrap().decode().unwrap();
        assert_eq!(recorded.function_name, "sha2-256");
        assert_eq!(recorded.length, 12);
        assert_eq!(memo.options().length, Some(12));

        let nan = Memo::create_with(options, [("bad", Value::Float(f64::NAN))]);
        assert_eq!(nan.unwrap_err().kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_display_renders_identifier() {
        let memo = sample();
        assert_eq!(memo.to_string(), memo.cid().unwrap().to_string());

        let blake: Memo =
            Memo::create_with(CidOptions::for_algorithm(Algorithm::Blake3), sample_entries())
                .unwrap();
        assert_eq!(blake.to_string(), blake.content_id().unwrap().as_str());
        assert_ne!(blake.to_string(), memo.to_string());

        let mut broken = sample();
        *broken.get_unchecked_mut("foo").unwrap() = Value::Float(f64::INFINITY);
        assert!(broken.to_string().starts_with("<encoding error"));
    }

    #[test]
    fn test_with_cache() {
        let mut memo: Memo = Memo::with_cache(CidCache::new(CidOptions::default(), 16));
        memo.set("foo", Value::from("bar")).unwrap();
        memo.get("foo").unwrap();
        memo.get("foo").unwrap();

        *memo.get_unchecked_mut("foo").unwrap() = Value::from("bad");
        assert!(memo.get("foo").unwrap_err().is_tamper());
    }

    #[test]
    fn test_nested_memo_values() {
        let inner = sample();
        let mut outer: Memo<Memo> = Memo::new();
        outer.set("inner", inner).unwrap();

        let data = outer.to_data().unwrap();
        assert_eq!(data.get("inner"), Some(&sample().to_data().unwrap()));

        outer
            .get_unchecked_mut("inner")
            .unwrap()
            .set("foo", Value::from("changed"))
            .unwrap();
        assert!(outer.get("inner").unwrap_err().is_tamper());
    }
}
