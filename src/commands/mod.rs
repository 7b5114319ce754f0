pub mod analyze;
pub mod ping;
pub mod render;
pub mod shell;
