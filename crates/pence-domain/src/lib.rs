//! pence-domain
//!
//! Pure domain models for the budget client (dates, money, categories,
//! line items). No I/O, no networking, no cache state. Only data types
//! and the value-level calculations they carry.

pub mod category;
pub mod date;
pub mod item;
pub mod money;

pub use category::*;
pub use date::*;
pub use item::*;
pub use money::*;
