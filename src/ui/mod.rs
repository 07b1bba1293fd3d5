pub mod animation;
pub mod components;
pub mod layout;
pub mod stage;
pub mod theme;
