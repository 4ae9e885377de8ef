pub mod draw;
pub mod event;
pub mod product;

pub use draw::draw_config;
pub use event::event_config;
pub use product::product_config;
