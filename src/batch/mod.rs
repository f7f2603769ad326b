mod table;
mod upload;

pub use table::*;
pub use upload::*;
