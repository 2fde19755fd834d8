pub mod friction;
pub mod question;

pub use friction::*;
pub use question::*;
