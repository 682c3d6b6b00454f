#![forbid(unsafe_code)]

mod store;
mod upgrade;

pub use store::*;
pub use upgrade::*;
