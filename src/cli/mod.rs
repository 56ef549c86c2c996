pub mod clipboard;
pub mod interactive;
pub mod output;
pub mod terminal;
