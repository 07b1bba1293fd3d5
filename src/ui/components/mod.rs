pub mod keyboard_view;
