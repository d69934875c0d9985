pub mod app;
pub mod input;
pub mod navigation;
pub mod popup;
pub mod render;
pub mod text_field;
pub mod theme;

pub use app::run;
