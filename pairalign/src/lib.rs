pub mod code;
pub mod demo;
pub mod text;

mod settings;
