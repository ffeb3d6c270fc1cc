//! # rota-id
//!
//! Typed identifiers for the roster engine.
//!
//! ## Design Principles
//!
//! - IDs are minted by the stores that own the data; the engine never creates them
//! - IDs are opaque: any non-empty, trimmed, printable string is accepted verbatim
//! - IDs are typed to prevent mixing a person with a position
//!
//! Examples of accepted IDs:
//! - `pos-drum`
//! - `u1`
//! - `5f0c3c1e-7d0b-4a4e-9f1a-2f9a8f0b6f21`

mod error;
mod macros;
mod types;

pub use error::IdError;
#[doc(hidden)]
pub use macros::validate;
pub use types::*;

/// Maximum accepted ID length in bytes.
pub const MAX_ID_LEN: usize = 128;
