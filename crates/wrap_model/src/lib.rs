//! Descriptions of the types a wrapper is generated for, and the
//! provider seam through which a host hands them over.
mod descriptor;
mod error;
mod provider;
mod shorthand;

pub use descriptor::*;
pub use error::*;
pub use provider::*;
