//! ScanMap: the container layer. Active-table selection, growth policy, and
//! the scan-based operations.

use crate::slot::{Entry, Slot};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use hashbrown::hash_map::DefaultHashBuilder;
use std::fmt;
use std::mem;

/// Ceiling a fresh map starts with; while the ceiling sits here the inline
/// table is the active one.
const INITIAL_FILL: usize = 8;

/// A map that looks entries up by scanning slots front-to-back instead of
/// indexing by bucket.
///
/// Storage starts in an inline table. Once live entries exceed two thirds of
/// the allocation ceiling, the slots move (in order, once, irreversibly
/// until [`clear`](ScanMap::clear)) to a heap table, and the ceiling doubles
/// on that and every later growth. Removals leave tombstones that later
/// insertions recycle.
///
/// Keys only need `Hash`: entries are matched by their stored hash, never by
/// key equality, so keys with colliding hashes alias the same entry.
pub struct ScanMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    inline: Vec<Slot<K, V>>,
    heap: Vec<Slot<K, V>>,
    used: usize,
    fill: usize,
}

/// Error returned by [`ScanMap::remove`] when no entry matches the key.
#[derive(Debug)]
pub enum RemoveError {
    KeyNotFound,
}

impl<K, V> ScanMap<K, V>
where
    K: Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for ScanMap<K, V>
where
    K: Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ScanMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            inline: Vec::with_capacity(INITIAL_FILL),
            heap: Vec::new(),
            used: 0,
            fill: INITIAL_FILL,
        }
    }

    /// Number of live entries; tombstones and the inline/heap split are
    /// invisible here.
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Current allocation ceiling. Starts at 8 and doubles whenever the live
    /// count exceeds two thirds of it; only [`clear`](ScanMap::clear) brings
    /// it back down.
    pub fn capacity(&self) -> usize {
        self.fill
    }

    /// Whether the heap table has taken over from the inline table.
    pub fn is_promoted(&self) -> bool {
        self.fill > INITIAL_FILL
    }

    /// Drops both tables and returns to the initial empty state.
    pub fn clear(&mut self) {
        self.inline = Vec::with_capacity(INITIAL_FILL);
        self.heap = Vec::new();
        self.used = 0;
        self.fill = INITIAL_FILL;
    }

    /// Iterates live entries in slot order, skipping tombstones.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.table().iter(),
        }
    }

    /// Whichever table is currently authoritative. Looked up on every call;
    /// growth can change the answer between calls.
    fn table(&self) -> &[Slot<K, V>] {
        if self.fill <= INITIAL_FILL {
            &self.inline
        } else {
            &self.heap
        }
    }

    fn table_mut(&mut self) -> &mut Vec<Slot<K, V>> {
        if self.fill <= INITIAL_FILL {
            &mut self.inline
        } else {
            &mut self.heap
        }
    }

    /// First growth retires the inline table into the heap table, keeping
    /// slot order and tombstones; every growth doubles the ceiling. Slots
    /// already on the heap stay where they are.
    fn grow(&mut self) {
        if self.fill == INITIAL_FILL {
            let retired = mem::take(&mut self.inline);
            self.heap.extend(retired);
        }
        self.fill *= 2;
    }
}

impl<K, V, S> ScanMap<K, V, S>
where
    K: Hash,
    S: BuildHasher,
{
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Returns the value of the first entry whose stored hash matches the
    /// query's hash, or `None`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        let hash = self.make_hash(key);
        self.table()
            .iter()
            .filter_map(Slot::entry)
            .find(|entry| entry.hash == hash)
            .map(|entry| &entry.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        let hash = self.make_hash(key);
        self.table_mut()
            .iter_mut()
            .filter_map(Slot::entry_mut)
            .find(|entry| entry.hash == hash)
            .map(|entry| &mut entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        self.get(key).is_some()
    }

    /// Inserts or updates. A matching entry has its value overwritten in
    /// place: the stored key and hash are kept, the caller's key is dropped,
    /// and the previous value is returned. A new key fills the first
    /// tombstone if one exists, otherwise appends, and then runs the growth
    /// check; updates never grow the map.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        for slot in self.table_mut().iter_mut() {
            if let Some(entry) = slot.entry_mut() {
                if entry.hash == hash {
                    return Some(mem::replace(&mut entry.value, value));
                }
            }
        }

        let entry = Entry { hash, key, value };
        let table = self.table_mut();
        match table.iter().position(Slot::is_tombstone) {
            Some(spare) => table[spare] = Slot::Occupied(entry),
            None => table.push(Slot::Occupied(entry)),
        }

        self.used += 1;
        // used > fill * 2/3, kept in integers
        if 3 * self.used > 2 * self.fill {
            self.grow();
        }
        None
    }

    /// Replaces the first matching slot with a tombstone and returns the
    /// evicted value. The table keeps its length; only `used` shrinks.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, RemoveError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        let hash = self.make_hash(key);
        let found = self
            .table()
            .iter()
            .position(|slot| matches!(slot.entry(), Some(entry) if entry.hash == hash));
        match found {
            Some(index) => {
                let evicted = mem::replace(&mut self.table_mut()[index], Slot::Tombstone);
                self.used -= 1;
                let entry = evicted
                    .into_entry()
                    .expect("matched slot position is occupied");
                Ok(entry.value)
            }
            None => Err(RemoveError::KeyNotFound),
        }
    }
}

impl<K, V, Q, S> Index<&Q> for ScanMap<K, V, S>
where
    K: Borrow<Q> + Hash,
    Q: ?Sized + Hash,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

/// Renders every occupied slot position of the active table in scan order;
/// tombstoned positions show up as `_: _`.
impl<K, V, S> fmt::Debug for ScanMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for slot in self.table() {
            match slot.entry() {
                Some(entry) => {
                    map.entry(&entry.key, &entry.value);
                }
                None => {
                    map.entry(&format_args!("_"), &format_args!("_"));
                }
            }
        }
        map.finish()
    }
}

/// Iterator over live entries in slot order.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .find_map(Slot::entry)
            .map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.slots.size_hint().1)
    }
}
