pub mod keymap;
pub mod sound;
pub mod window;
