mod error_handling;
mod utils;
pub mod wrapper;

pub use error_handling::*;
pub use utils::*;
