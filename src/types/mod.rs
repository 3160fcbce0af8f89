pub mod block;
pub mod row;

pub use block::*;
pub use row::*;
