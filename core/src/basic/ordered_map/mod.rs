//!
//! An insertion-ordered map with array-like query and transform methods.
//!
//! `OrderedMap` keeps its entries in a `Vec` in iteration order and maps every
//! key to its position with a `HashMap`. Keys are unique: setting an existing
//! key replaces the value in place, a new key is appended to the end.
//!
//! Methods that derive a new collection (`map`, `filter`, `concat`, `clone`,
//! `to_sequence`) never touch the receiver. `set`, `delete`, the `remove*`
//! family and `sort` mutate it in place.
//!
//! # Examples
//!
//! ```
//! use emap_core::OrderedMap;
//!
//! let mut m = OrderedMap::new();
//! m.set("a", 1).set("b", 2).set("a", 3);
//!
//! assert_eq!(m.len(), 2);
//! assert_eq!(m.to_pairs(), vec![("a", 3), ("b", 2)]);
//!
//! let bumped = m.map(|e, _| (e.key, e.value + 1));
//! assert_eq!(bumped.get("a"), Some(&4));
//! assert_eq!(m.get("a"), Some(&3));
//! ```
//!


mod iter;

pub use iter::{IntoIter, Iter, Keys, Values, ValuesMut};

use crate::common::emap_get_default_capacity;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    borrow::Borrow,
    cmp::Ordering,
    collections::{HashMap, HashSet},
    fmt,
    hash::Hash,
    ops::Index,
};

/// One key/value pair stored in an [`OrderedMap`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    #[inline(always)]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    #[inline(always)]
    pub fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    #[inline(always)]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<Entry<K, V>> for (K, V) {
    fn from(e: Entry<K, V>) -> Self {
        e.into_pair()
    }
}

/// What a mapper passed to [`OrderedMap::map`] may return.
pub trait IntoEntry {
    type Key;
    type Value;

    fn into_entry(self) -> Entry<Self::Key, Self::Value>;
}

impl<K, V> IntoEntry for Entry<K, V> {
    type Key = K;
    type Value = V;

    fn into_entry(self) -> Self {
        self
    }
}

impl<K, V> IntoEntry for (K, V) {
    type Key = K;
    type Value = V;

    fn into_entry(self) -> Entry<K, V> {
        self.into()
    }
}

/// An insertion-ordered map with unique keys.
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<Entry<K, V>>,

    // key ==> position in `entries`
    index: HashMap<K, usize>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty map,
    /// preallocating ${EMAP_DEFAULT_CAPACITY} slots.
    #[inline(always)]
    pub fn new() -> Self {
        Self::with_capacity(emap_get_default_capacity())
    }

    #[inline(always)]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cap),
            index: HashMap::with_capacity(cap),
        }
    }

    /// Builds a map from entries in their given order.
    ///
    /// Duplicated keys follow [`set`](Self::set): the first position
    /// is kept, the last value wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Entry<K, V>>,
    {
        let entries = entries.into_iter();
        let mut m = Self::with_capacity(entries.size_hint().0);
        entries.for_each(|e| {
            m.set(e.key, e.value);
        });
        m
    }

    /// Same as [`from_entries`](Self::from_entries), but takes tuples.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_entries(pairs.into_iter().map(Entry::from))
    }

    /// Inserts or overwrites an entry.
    ///
    /// An existing key keeps its position, a new key is appended.
    pub fn set(&mut self, key: K, value: V) -> &mut Self {
        match self.index.get(&key) {
            Some(&pos) => {
                self.entries[pos].value = value;
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(Entry { key, value });
            }
        }
        self
    }

    #[inline(always)]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&pos| &self.entries[pos].value)
    }

    #[inline(always)]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let pos = *self.index.get(key)?;
        Some(&mut self.entries[pos].value)
    }

    /// Retrieves the value at `idx` in iteration order.
    #[inline(always)]
    pub fn get_at(&self, idx: usize) -> Option<&V> {
        self.entries.get(idx).map(|e| &e.value)
    }

    /// Retrieves the entry at `idx` in iteration order.
    #[inline(always)]
    pub fn entry_at(&self, idx: usize) -> Option<&Entry<K, V>> {
        self.entries.get(idx)
    }

    /// The position of `key` in iteration order.
    #[inline(always)]
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).copied()
    }

    #[inline(always)]
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Checks if all of the `keys` exist, `true` for an empty list.
    pub fn has_all<'k, Q, I>(&self, keys: I) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'k,
        I: IntoIterator<Item = &'k Q>,
    {
        keys.into_iter().all(|k| self.has(k))
    }

    /// Checks if any of the `keys` exists, `false` for an empty list.
    pub fn has_any<'k, Q, I>(&self, keys: I) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'k,
        I: IntoIterator<Item = &'k Q>,
    {
        keys.into_iter().any(|k| self.has(k))
    }

    /// Removes one key, returning its value.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let pos = self.index.remove(key)?;
        let removed = self.entries.remove(pos);
        self.refresh_positions(pos);
        Some(removed.value)
    }

    /// Removes every entry matching `filter`.
    ///
    /// The index passed to `filter` is the position the entry had
    /// before this call removed anything.
    pub fn remove<F>(&mut self, mut filter: F) -> &mut Self
    where
        F: FnMut(&Entry<K, V>, usize) -> bool,
    {
        // verdicts first, so a panicking `filter` leaves the map untouched
        let verdicts = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| filter(e, i))
            .collect::<Vec<_>>();

        let first_gap = match verdicts.iter().position(|&hit| hit) {
            Some(i) => i,
            None => return self,
        };

        let index = &mut self.index;
        let mut verdicts = verdicts.into_iter();
        self.entries.retain(|e| {
            let hit = verdicts.next().unwrap_or(false);
            if hit {
                index.remove(&e.key);
            }
            !hit
        });

        self.refresh_positions(first_gap);
        self
    }

    /// Removes the entries with the given keys.
    pub fn remove_keys<'k, Q, I>(&mut self, keys: I) -> &mut Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'k,
        I: IntoIterator<Item = &'k Q>,
    {
        let doomed = keys.into_iter().collect::<HashSet<_>>();
        if doomed.is_empty() {
            return self;
        }
        self.remove(|e, _| doomed.contains(<K as Borrow<Q>>::borrow(&e.key)))
    }

    #[inline(always)]
    pub fn remove_all(&mut self) -> &mut Self {
        self.entries.clear();
        self.index.clear();
        self
    }

    /// Checks if at least one entry matches `filter`.
    ///
    /// `filter` runs against every entry, there is no short-circuit.
    pub fn some<F>(&self, mut filter: F) -> bool
    where
        F: FnMut(&Entry<K, V>, usize) -> bool,
    {
        let mut hit = false;
        self.each(|e, i| hit |= filter(e, i));
        hit
    }

    /// Checks if all entries match `filter`, `true` for an empty map.
    ///
    /// `filter` runs against every entry, there is no short-circuit.
    pub fn every<F>(&self, mut filter: F) -> bool
    where
        F: FnMut(&Entry<K, V>, usize) -> bool,
    {
        let mut all = true;
        self.each(|e, i| all &= filter(e, i));
        all
    }

    /// Calls `f` once per entry in iteration order.
    #[inline(always)]
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&Entry<K, V>, usize),
    {
        self.entries.iter().enumerate().for_each(|(i, e)| f(e, i));
    }

    /// Builds a new map from what `mapper` returns for each entry.
    ///
    /// Results are inserted with `set` semantics, so colliding keys keep
    /// the position of their first occurrence and the value of the last.
    pub fn map<T, F>(&self, mut mapper: F) -> OrderedMap<T::Key, T::Value>
    where
        T: IntoEntry,
        T::Key: Eq + Hash + Clone,
        F: FnMut(&Entry<K, V>, usize) -> T,
    {
        let mut m = OrderedMap::with_capacity(self.len());
        self.each(|e, i| {
            let Entry { key, value } = mapper(e, i).into_entry();
            m.set(key, value);
        });
        m
    }

    /// Folds the entries from first to last.
    pub fn reduce<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, &Entry<K, V>, usize, &Self) -> A,
    {
        self.entries
            .iter()
            .enumerate()
            .fold(init, |acc, (i, e)| f(acc, e, i, self))
    }

    /// Reorders the entries in place, equal entries keep their relative order.
    pub fn sort<F>(&mut self, mut cmp: F) -> &mut Self
    where
        F: FnMut(&Entry<K, V>, &Entry<K, V>) -> Ordering,
    {
        {
            let guard = Reindex { map: &mut *self };
            guard.map.entries.sort_by(|a, b| cmp(a, b));
        }
        self
    }

    pub fn sort_by_key<T, F>(&mut self, mut f: F) -> &mut Self
    where
        T: Ord,
        F: FnMut(&Entry<K, V>) -> T,
    {
        {
            let guard = Reindex { map: &mut *self };
            guard.map.entries.sort_by_key(|e| f(e));
        }
        self
    }

    /// Finds all entries matching `finder`.
    ///
    /// Returns `None` if nothing matched, never an empty `Vec`.
    pub fn find_all<F>(&self, mut finder: F) -> Option<Vec<&Entry<K, V>>>
    where
        F: FnMut(&Entry<K, V>, usize) -> bool,
    {
        let found = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, e)| finder(e, *i))
            .map(|(_, e)| e)
            .collect::<Vec<_>>();

        if found.is_empty() { None } else { Some(found) }
    }

    /// The first entry of [`find_all`](Self::find_all).
    pub fn find<F>(&self, finder: F) -> Option<&Entry<K, V>>
    where
        F: FnMut(&Entry<K, V>, usize) -> bool,
    {
        self.find_all(finder).and_then(|found| found.into_iter().next())
    }

    /// Keeps the entries for which `filter` returns `true`, in a new map.
    pub fn filter<F>(&self, mut filter: F) -> Self
    where
        V: Clone,
        F: FnMut(&V, &K) -> bool,
    {
        let mut m = Self::with_capacity(self.len());
        self.entries
            .iter()
            .filter(|e| filter(&e.value, &e.key))
            .for_each(|e| {
                m.set(e.key.clone(), e.value.clone());
            });
        m
    }

    /// Joins `self` with `others` into a new map.
    ///
    /// Entries are inserted with `set` semantics in argument order:
    /// a later map overwrites the value of a key that is already present,
    /// the key keeps its earlier position.
    pub fn concat<'a, K2, V2, I>(&self, others: I) -> Self
    where
        V: Clone,
        K2: Clone + Into<K> + 'a,
        V2: Clone + Into<V> + 'a,
        I: IntoIterator<Item = &'a OrderedMap<K2, V2>>,
    {
        let mut m = self.clone();
        others.into_iter().for_each(|other| {
            other.entries.iter().for_each(|e| {
                m.set(e.key.clone().into(), e.value.clone().into());
            });
        });
        m
    }

    /// A snapshot of all entries in iteration order.
    pub fn to_sequence(&self) -> Vec<Entry<K, V>>
    where
        V: Clone,
    {
        self.entries.clone()
    }

    pub fn to_pairs(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }

    #[inline(always)]
    pub fn into_sequence(self) -> Vec<Entry<K, V>> {
        self.entries
    }

    // Positions before `from` are untouched by the caller.
    fn refresh_positions(&mut self, from: usize) {
        for (i, e) in self.entries.iter().enumerate().skip(from) {
            if let Some(pos) = self.index.get_mut(&e.key) {
                *pos = i;
            }
        }
    }
}

// Re-syncs the position index on drop, also when a sort callback panics.
struct Reindex<'a, K, V>
where
    K: Eq + Hash + Clone,
{
    map: &'a mut OrderedMap<K, V>,
}

impl<K, V> Drop for Reindex<'_, K, V>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        self.map.refresh_positions(0);
    }
}

impl<K, V> OrderedMap<K, V> {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in iteration order.
    #[inline(always)]
    pub fn as_slice(&self) -> &[Entry<K, V>] {
        &self.entries
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(Entry::as_pair))
            .finish()
    }
}

// Order-sensitive: the same entries in a different order are not equal.
impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K, V, Q> Index<&Q> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("key not found in OrderedMap"),
        }
    }
}

impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Entry<K, V>>::deserialize(deserializer).map(Self::from_entries)
    }
}
