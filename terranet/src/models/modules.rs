mod basic_block;
mod neighbors;
mod pipeline;
mod sampling;

pub use basic_block::*;
pub use neighbors::*;
pub use pipeline::*;
pub use sampling::*;
