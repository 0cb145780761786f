pub mod block;
pub mod common;
pub mod district;

pub use block::*;
pub use common::*;
pub use district::*;
