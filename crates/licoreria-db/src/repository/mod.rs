//! Repository implementations.
//!
//! One repository per aggregate: catalog products, the singleton cart, and
//! the consumption statistics table. Repositories hold a pool clone and
//! expose async CRUD; business rules stay in licoreria-core.

pub mod cart;
pub mod consumption;
pub mod product;
