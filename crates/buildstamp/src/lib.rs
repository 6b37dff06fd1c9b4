#![doc = include_str!("../README.md")]

mod config;
mod error;
mod generator;
mod id;
mod normalize;
mod properties;
mod rand;
mod state;
mod time;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::normalize::*;
pub use crate::properties::*;
pub use crate::rand::*;
pub use crate::state::*;
pub use crate::time::*;
