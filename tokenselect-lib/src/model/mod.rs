//! Item, node and token types

mod item;
mod node;
mod token;

pub use item::*;
pub use node::*;
pub use token::*;
