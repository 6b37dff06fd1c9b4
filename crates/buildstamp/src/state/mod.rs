mod interface;
mod memory;
mod mutex;

pub use interface::*;
pub use memory::*;
pub(crate) use mutex::*;
