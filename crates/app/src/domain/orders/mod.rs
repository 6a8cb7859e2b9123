//! Orders

pub mod data;
pub mod errors;
pub mod pricing;
pub mod records;
pub mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
