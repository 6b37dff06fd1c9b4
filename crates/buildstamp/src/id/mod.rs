mod build_id;
mod build_token;

pub use build_id::*;
pub use build_token::*;
