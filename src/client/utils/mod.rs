pub mod file_picker;
pub mod theme_store;
