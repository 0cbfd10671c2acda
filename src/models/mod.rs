pub mod campaign;
pub mod common;
pub mod draw;
pub mod pagination;
pub mod winner;

pub use campaign::*;
pub use common::*;
pub use draw::*;
pub use pagination::*;
pub use winner::*;
