//! Data models
//!
//! Wire types of the store backend REST API (`/api/v1`). Field names are
//! camelCase on the wire. All IDs are opaque strings issued by the backend,
//! all money is `Decimal`.

pub mod customer;
pub mod inventory;
pub mod product;
pub mod quotation;
pub mod returns;
pub mod sales;
pub mod supplier;
pub mod tailoring;
pub mod transaction;

// Re-exports
pub use customer::*;
pub use inventory::*;
pub use product::*;
pub use quotation::*;
pub use returns::*;
pub use sales::*;
pub use supplier::*;
pub use tailoring::*;
pub use transaction::*;
