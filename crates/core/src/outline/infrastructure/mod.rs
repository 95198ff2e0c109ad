pub mod outline_factory;
pub mod oval_outline;
pub mod rect_outline;
