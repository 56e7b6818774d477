//! Blamer abstraction and attribution data types

mod blamer;
mod types;

pub use blamer::{Blamer, NullBlamer};
pub use types::{Blames, FileBlame, FileLocations, LineBlame};
