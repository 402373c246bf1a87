//! Cache tiers for API responses
//!
//! Two tiers with one owner each: `TtlCache`, a bounded in-memory map with
//! per-entry expiry (one instance per resource kind), and `DiskCache`, a
//! durable one-file-per-key JSON store that doubles as the long-window
//! offline fallback when the network is unavailable.

mod disk;
mod memory;

pub use disk::DiskCache;
pub use memory::TtlCache;
