//! Query modules over the data-directory lookup tables.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes methods
//! returning `Result<T>`.

pub mod ports;
pub mod rates;

pub use ports::PortQuery;
pub use rates::RateQuery;
