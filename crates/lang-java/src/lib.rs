//! Java class files as the class metadata source for `namebridge-core`.

pub mod classfile;
pub mod jar;
pub mod loader;

pub use jar::JarClassReader;
pub use loader::{load_from_gradle_cache, load_from_sources, save_from_gradle_cache};
