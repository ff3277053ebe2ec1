mod loader;

pub use loader::{load_optional_text, load_text};
