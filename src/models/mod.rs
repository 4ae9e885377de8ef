pub mod draw;
pub mod event;
pub mod product;

pub use draw::*;
pub use event::*;
pub use product::*;
