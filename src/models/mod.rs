pub mod analysis_types;
pub mod file_types;
pub mod ui_types;
