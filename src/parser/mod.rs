pub mod header;
pub mod reader;

pub use header::*;
pub use reader::*;
