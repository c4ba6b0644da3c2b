pub mod handlers;
pub mod html;
pub mod templates;
pub mod theme;
pub mod tree;
