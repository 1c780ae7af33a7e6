//! Repository abstraction over where shop records live.
//!
//! Services receive an `Arc<dyn ShopStore>` at construction time; nothing in the
//! crate reaches for a global connection. Every mutating call is one atomic unit
//! in its backend.

mod memory;
mod postgres;
mod traits;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use traits::ShopStore;
