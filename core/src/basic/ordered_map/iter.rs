use super::{Entry, OrderedMap};
use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
    iter::FusedIterator,
    slice, vec,
};

impl<K, V> OrderedMap<K, V> {
    /// Returns an iterator over the map's entries, in iteration order.
    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the map's keys.
    #[inline(always)]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the map's values.
    #[inline(always)]
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.entries.iter(),
        }
    }

    /// Returns a mutable iterator over the map's values.
    ///
    /// Keys are not reachable mutably, so the position index stays valid.
    #[inline(always)]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.entries.iter_mut(),
        }
    }
}

macro_rules! impl_iter {
    ($name: ident, $item: ty, |$e: ident| $map: expr) => {
        impl<'a, K, V> Iterator for $name<'a, K, V> {
            type Item = $item;

            #[inline(always)]
            fn next(&mut self) -> Option<Self::Item> {
                self.inner.next().map(|$e| $map)
            }

            #[inline(always)]
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.inner.size_hint()
            }
        }

        impl<'a, K, V> DoubleEndedIterator for $name<'a, K, V> {
            #[inline(always)]
            fn next_back(&mut self) -> Option<Self::Item> {
                self.inner.next_back().map(|$e| $map)
            }
        }

        impl<'a, K, V> ExactSizeIterator for $name<'a, K, V> {}

        impl<'a, K, V> FusedIterator for $name<'a, K, V> {}
    };
}

/// Iterator over `(&K, &V)`.
pub struct Iter<'a, K, V> {
    inner: slice::Iter<'a, Entry<K, V>>,
}

impl_iter!(Iter, (&'a K, &'a V), |e| (&e.key, &e.value));

/// Iterator over `&K`.
pub struct Keys<'a, K, V> {
    inner: slice::Iter<'a, Entry<K, V>>,
}

impl_iter!(Keys, &'a K, |e| &e.key);

/// Iterator over `&V`.
pub struct Values<'a, K, V> {
    inner: slice::Iter<'a, Entry<K, V>>,
}

impl_iter!(Values, &'a V, |e| &e.value);

/// Iterator over `&mut V`.
pub struct ValuesMut<'a, K, V> {
    inner: slice::IterMut<'a, Entry<K, V>>,
}

impl_iter!(ValuesMut, &'a mut V, |e| &mut e.value);

/// Owning iterator over `(K, V)`.
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<Entry<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::into_pair)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Entry::into_pair)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K, V> FromIterator<Entry<K, V>> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = Entry<K, V>>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(|(k, v)| {
            self.set(k, v);
        });
    }
}

impl<K, V> Extend<Entry<K, V>> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = Entry<K, V>>>(&mut self, iter: I) {
        iter.into_iter().for_each(|e| {
            self.set(e.key, e.value);
        });
    }
}

impl<K, V> From<Vec<(K, V)>> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl<K, V> From<Vec<Entry<K, V>>> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(entries: Vec<Entry<K, V>>) -> Self {
        Self::from_entries(entries)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_pairs(pairs)
    }
}

// The order is whatever the `HashMap` yields.
impl<K, V> From<HashMap<K, V>> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(m: HashMap<K, V>) -> Self {
        Self::from_pairs(m)
    }
}

impl<K, V> From<BTreeMap<K, V>> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(m: BTreeMap<K, V>) -> Self {
        Self::from_pairs(m)
    }
}
