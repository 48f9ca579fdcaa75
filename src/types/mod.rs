//! Type definitions for stockheat

mod error;
mod price;

pub use error::*;
pub use price::*;
