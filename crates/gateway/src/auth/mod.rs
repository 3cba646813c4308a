//! Token handling for the HTTP surface.

mod token;

pub use token::{Claims, TokenService};
