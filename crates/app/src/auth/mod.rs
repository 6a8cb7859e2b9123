//! Authentication and authorization

mod errors;
mod models;
mod principal;
pub mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use principal::*;
pub use repository::{AuthRepository, PgAuthRepository};
pub use service::*;
pub use token::*;
