pub mod errors;
pub mod shutdown;
pub mod types;

pub use errors::*;
pub use shutdown::*;
pub use types::*;
