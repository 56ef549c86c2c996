pub mod loader;

pub use loader::{DictionarySource, LoadError};
