//! Data models for the favourites service.
//!
//! Wire names are camelCase to match the frontend contract.

mod asset;
mod favourite;
mod user;

pub use asset::*;
pub use favourite::*;
pub use user::*;
