//! Carts

pub mod cart;
pub mod data;
pub mod errors;
pub mod records;
pub mod service;

pub use cart::{Cart, CartEntry, CartError};
pub use errors::CartsServiceError;
pub use service::*;
