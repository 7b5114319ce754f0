pub mod deadline;
pub mod file_holder;
pub mod fs_service;
pub mod orchestrator;
pub mod presentation;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_utils;
