pub mod decode;
pub mod encode;
pub mod info;
pub mod send;
pub mod slice;

pub use decode::*;
pub use encode::*;
pub use info::*;
pub use send::*;
pub use slice::*;
