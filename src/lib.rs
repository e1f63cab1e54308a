//! scan-map: a single-threaded map that keeps the memory-growth
//! behavior of a real dictionary while replacing bucket dispatch with a
//! plain linear scan over slots.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: model how a dictionary manages its memory (a small inline
//!   table, a load-factor check, a one-time promotion to heap storage)
//!   while keeping the lookup path deliberately simple: a front-to-back
//!   scan of the active table.
//! - Layers:
//!   - Slot<K, V>: one table position, either an occupied entry
//!     (precomputed hash, key, value) or a tombstone left behind by a
//!     removal. Tombstones keep their position and are recycled by
//!     later insertions; the table never shrinks except on `clear`.
//!   - ScanMap<K, V, S>: the container. Owns an inline table and a
//!     heap table, exactly one of which is active, plus the live-entry
//!     count and the allocation ceiling that drive growth.
//!
//! Growth policy
//! - The ceiling starts at 8 with the inline table active. Placing a
//!   new key (updates don't count) checks the load factor; once live
//!   entries exceed two thirds of the ceiling, the map grows.
//! - The first growth moves every slot, tombstones included, from the
//!   inline table to the heap table in slot order and permanently
//!   retires the inline table. Every growth doubles the ceiling; slots
//!   already on the heap are never moved or rehashed.
//! - `clear` is the only way back: it discards both tables and resets
//!   the ceiling.
//!
//! Constraints
//! - Single-threaded API: all mutation goes through `&mut self`; no
//!   internal synchronization and no interior mutability.
//! - Entries are matched by their stored hash alone. `K: Hash` is the
//!   only requirement on keys; two keys that hash identically are
//!   treated as the same key. With a 64-bit default hasher this only
//!   surfaces under deliberate collisions, but a degenerate hasher
//!   makes it directly observable.
//! - Every operation scans the active table: O(n), not O(1).
//!
//! Notes and non-goals
//! - No bucket index or probe sequence; the scan is the lookup.
//! - No iteration-order guarantee beyond the current slot order.
//! - Removals tombstone their slot rather than compacting; `len`
//!   reflects live entries only.
//! - Hashing is pluggable through `S: BuildHasher`, defaulting to
//!   `hashbrown::DefaultHashBuilder`.

mod scan_map;
mod scan_map_proptest;
mod slot;

// Public surface
pub use scan_map::{Iter, RemoveError, ScanMap};
