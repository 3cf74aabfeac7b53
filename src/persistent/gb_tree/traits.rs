//! Standard trait implementations for [`GbTree`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::super::ReferenceCounter;
use super::{GbTree, GbTreeIntoIterator, GbTreeIterator};

impl<K, V, C> Clone for GbTree<K, V, C> {
    /// Clones the tree in O(1); both values share every node.
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            length: self.length,
            comparator: ReferenceCounter::clone(&self.comparator),
        }
    }
}

impl<K: Ord, V> Default for GbTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for GbTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K: Clone, V: Clone, C> IntoIterator for GbTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = GbTreeIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        GbTreeIntoIterator {
            entries: self.to_vec().into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a GbTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = GbTreeIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two trees are equal when they hold equal entries in the same order.
impl<K: PartialEq, V: PartialEq, C> PartialEq for GbTree<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for GbTree<K, V, C> {}

/// Hashes the length, then each entry in comparator order, so trees built
/// from the same entries in any insertion order hash alike.
impl<K: Hash, V: Hash, C> Hash for GbTree<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for GbTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for GbTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, C> serde::Serialize for GbTree<K, V, C>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct GbTreeVisitor<K, V> {
    marker: std::marker::PhantomData<fn() -> (K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for GbTreeVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord + Clone,
    V: serde::Deserialize<'de> + Clone,
{
    type Value = GbTree<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut tree = GbTree::new();
        while let Some((key, value)) = access.next_entry()? {
            tree = tree.put(key, value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for GbTree<K, V>
where
    K: serde::Deserialize<'de> + Ord + Clone,
    V: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(GbTreeVisitor {
            marker: std::marker::PhantomData,
        })
    }
}
