//! Slot storage: occupied entries and the tombstones removals leave behind.

/// One stored association. The hash is computed when the entry is created and
/// never recomputed; updates overwrite the value in place and keep the
/// original key and hash.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

/// One position in a table. Removals do not compact the table; they replace
/// the slot with `Tombstone`, which keeps occupying its position until a
/// later insertion recycles it. The tombstone is a dedicated variant, so no
/// user-supplied key or value can be mistaken for one.
#[derive(Debug)]
pub(crate) enum Slot<K, V> {
    Occupied(Entry<K, V>),
    Tombstone,
}

impl<K, V> Slot<K, V> {
    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    pub(crate) fn entry(&self) -> Option<&Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Tombstone => None,
        }
    }

    pub(crate) fn entry_mut(&mut self) -> Option<&mut Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Tombstone => None,
        }
    }

    pub(crate) fn into_entry(self) -> Option<Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Tombstone => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tombstone_has_no_entry() {
        let slot: Slot<&str, i32> = Slot::Tombstone;
        assert!(slot.is_tombstone());
        assert!(slot.entry().is_none());
        assert!(slot.into_entry().is_none());
    }

    #[test]
    fn occupied_exposes_its_entry() {
        let mut slot = Slot::Occupied(Entry {
            hash: 7,
            key: "k",
            value: 1,
        });
        assert!(!slot.is_tombstone());
        assert_eq!(slot.entry().map(|e| e.hash), Some(7));
        if let Some(entry) = slot.entry_mut() {
            entry.value = 2;
        }
        let entry = slot.into_entry().unwrap();
        assert_eq!((entry.key, entry.value), ("k", 2));
    }
}
