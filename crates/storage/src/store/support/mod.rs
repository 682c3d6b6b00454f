#![forbid(unsafe_code)]

mod schema;
mod sequence;

pub(super) use schema::install_schema;
pub(super) use sequence::*;
