pub mod action;
pub mod binding;
pub mod conversion;
pub mod keymap;
pub mod keysym;
pub mod romaji;
pub mod settings;
pub mod unicode;
