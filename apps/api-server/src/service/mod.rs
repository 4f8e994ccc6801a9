//! Service layer.
//!
//! Handlers stay thin; anything that needs more than one store round trip
//! lives here.

pub mod cart;
