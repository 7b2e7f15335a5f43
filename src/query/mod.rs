pub mod compiler;
pub mod validate;

pub use compiler::{Compiled, compile};
pub use validate::validate;
