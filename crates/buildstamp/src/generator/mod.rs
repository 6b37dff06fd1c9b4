mod build_id;
mod build_token;
mod chain;
mod interface;

pub use build_id::*;
pub use build_token::*;
pub use chain::*;
pub use interface::*;
