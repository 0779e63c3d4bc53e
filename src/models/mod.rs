pub mod charge;
pub mod container;
pub mod nomination;
pub mod rates;
pub mod request;
pub mod results;

pub use charge::*;
pub use container::*;
pub use nomination::*;
pub use rates::*;
pub use request::*;
pub use results::*;
