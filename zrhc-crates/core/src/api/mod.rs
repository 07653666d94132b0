mod options;
mod pipeline;

pub use options::*;
pub use pipeline::*;
