use iced::widget::image;
use log::{debug, warn};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// An image picked by the user, fully read into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub path: Option<PathBuf>,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            path: None,
            mime: mime.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

// Never dump the image bytes into logs.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("file_name", &self.file_name)
            .field("path", &self.path)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    live: HashSet<u64>,
    released: Vec<u64>,
}

/// Hands out preview handles and keeps track of which ones were released.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, file: &SelectedFile) -> Preview {
        let id = {
            let mut guard = self.inner.lock().unwrap_or_else(|p| p.into_inner());
            guard.next_id += 1;
            let id = guard.next_id;
            guard.live.insert(id);
            id
        };
        debug!("[PREVIEW] acquired #{} for {}", id, file.file_name);
        Preview {
            id,
            file_name: file.file_name.clone(),
            handle: image::Handle::from_memory(file.bytes.clone()),
            registry: self.clone(),
        }
    }

    fn release(&self, id: u64) {
        let mut guard = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        if guard.live.remove(&id) {
            guard.released.push(id);
            debug!("[PREVIEW] released #{}", id);
        } else {
            warn!("[PREVIEW] #{} released twice or never acquired", id);
        }
    }

    pub fn live_count(&self) -> usize {
        self.inner.lock().map(|g| g.live.len()).unwrap_or(0)
    }

    /// How many times `id` has been released (0 or 1).
    pub fn release_count(&self, id: u64) -> usize {
        self.inner
            .lock()
            .map(|g| g.released.iter().filter(|r| **r == id).count())
            .unwrap_or(0)
    }
}

/// Locally created image handle for the selected file. Released on drop.
pub struct Preview {
    id: u64,
    file_name: String,
    handle: image::Handle,
    registry: PreviewRegistry,
}

impl Preview {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn handle(&self) -> image::Handle {
        self.handle.clone()
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preview")
            .field("id", &self.id)
            .field("file_name", &self.file_name)
            .finish()
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_a_preview_releases_it_once() {
        let registry = PreviewRegistry::new();
        let file = SelectedFile::new("a.png", "image/png", vec![1, 2, 3]);
        let preview = registry.acquire(&file);
        let id = preview.id();
        assert_eq!(registry.live_count(), 1);
        assert_eq!(registry.release_count(id), 0);

        drop(preview);
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.release_count(id), 1);
    }

    #[test]
    fn ids_are_unique() {
        let registry = PreviewRegistry::new();
        let file = SelectedFile::new("a.png", "image/png", vec![]);
        let a = registry.acquire(&file);
        let b = registry.acquire(&file);
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn debug_hides_bytes() {
        let file = SelectedFile::new("face.jpg", "image/jpeg", vec![0xff; 64]);
        let dbg = format!("{:?}", file);
        assert!(dbg.contains("size: 64"));
        assert!(!dbg.contains("255"));
    }
}
