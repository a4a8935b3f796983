mod emitter;
mod matcher;
mod writer;

pub use emitter::*;
pub use matcher::*;
pub use writer::*;
