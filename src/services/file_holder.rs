use crate::models::file_types::SelectedFile;
use std::sync::Arc;

/// Keeps the one file the user currently has picked. A plain store: no
/// validation, no errors.
#[derive(Debug, Default)]
pub struct SelectedFileHolder {
    file: Option<Arc<SelectedFile>>,
}

impl SelectedFileHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was held before.
    pub fn select(&mut self, file: SelectedFile) {
        self.file = Some(Arc::new(file));
    }

    pub fn clear(&mut self) {
        self.file = None;
    }

    /// Shared handle for the duration of one request.
    pub fn current(&self) -> Option<Arc<SelectedFile>> {
        self.file.clone()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_deref().map(|f| f.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_replaces_previous_file() {
        let mut holder = SelectedFileHolder::new();
        holder.select(SelectedFile::new("a.png", "image/png", vec![1u8]));
        holder.select(SelectedFile::new("b.jpg", "image/jpeg", vec![2u8, 3]));

        let current = holder.current().unwrap();
        assert_eq!(current.name, "b.jpg");
        assert_eq!(current.len(), 2);
    }

    #[test]
    fn clear_drops_file() {
        let mut holder = SelectedFileHolder::new();
        holder.select(SelectedFile::new("a.png", "image/png", vec![1u8]));
        holder.clear();
        assert!(holder.is_empty());
        assert_eq!(holder.file_name(), None);
    }

    #[test]
    fn does_not_enforce_mime_type() {
        let mut holder = SelectedFileHolder::new();
        holder.select(SelectedFile::new("notes.txt", "text/plain", "hi"));
        assert_eq!(holder.file_name(), Some("notes.txt"));
    }
}
