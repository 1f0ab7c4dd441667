pub mod id;
pub mod pagination;
pub mod shutdown;

pub use id::*;
pub use pagination::*;
pub use shutdown::*;
