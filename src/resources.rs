//! Resource cache
//!
//! Textures, shaders, meshes and levels are loaded once per logical name
//! and reused by name afterwards. The actual loading is delegated to an
//! [`AssetLoader`] supplied by the host. A failed load is logged and the
//! caller gets `None`; nothing is cached for it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::renderer::{MeshId, ShaderId, TextureId};
use crate::sim::level::{Level, LevelError};

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Resource not found: {0}")]
    NotFound(PathBuf),
    #[error("Invalid resource '{name}': {reason}")]
    Invalid { name: String, reason: String },
    #[error("Level error: {0}")]
    Level(#[from] LevelError),
}

/// Host-side loading of GPU resources
pub trait AssetLoader {
    fn load_texture(&mut self, path: &Path, alpha: bool) -> Result<TextureId, ResourceError>;
    fn load_shader(&mut self, vertex: &Path, fragment: &Path) -> Result<ShaderId, ResourceError>;
    fn load_mesh(&mut self, path: &Path) -> Result<MeshId, ResourceError>;
}

/// Name-keyed cache of handles
#[derive(Debug, Clone)]
pub struct Cache<H> {
    kind: &'static str,
    entries: HashMap<String, H>,
}

impl<H: Clone> Cache<H> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Return the cached entry, or run `load` once and cache its success
    pub fn get_or_load<F>(&mut self, name: &str, load: F) -> Option<H>
    where
        F: FnOnce() -> Result<H, ResourceError>,
    {
        if let Some(entry) = self.entries.get(name) {
            return Some(entry.clone());
        }
        match load() {
            Ok(entry) => {
                log::info!("Loaded {} '{}'", self.kind, name);
                self.entries.insert(name.to_string(), entry.clone());
                Some(entry)
            }
            Err(e) => {
                log::error!("Failed to load {} '{}': {}", self.kind, name, e);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<H> {
        let entry = self.entries.get(name).cloned();
        if entry.is_none() {
            log::warn!("Unknown {} '{}'", self.kind, name);
        }
        entry
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Every resource the games use, cached by name
#[derive(Debug)]
pub struct ResourceManager<L: AssetLoader> {
    loader: L,
    pub textures: Cache<TextureId>,
    pub shaders: Cache<ShaderId>,
    pub meshes: Cache<MeshId>,
    pub levels: Cache<Level>,
}

impl<L: AssetLoader> ResourceManager<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            textures: Cache::new("texture"),
            shaders: Cache::new("shader"),
            meshes: Cache::new("mesh"),
            levels: Cache::new("level"),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn load_texture(&mut self, name: &str, path: impl AsRef<Path>, alpha: bool) -> Option<TextureId> {
        let loader = &mut self.loader;
        self.textures
            .get_or_load(name, || loader.load_texture(path.as_ref(), alpha))
    }

    pub fn load_shader(
        &mut self,
        name: &str,
        vertex: impl AsRef<Path>,
        fragment: impl AsRef<Path>,
    ) -> Option<ShaderId> {
        let loader = &mut self.loader;
        self.shaders
            .get_or_load(name, || loader.load_shader(vertex.as_ref(), fragment.as_ref()))
    }

    pub fn load_mesh(&mut self, name: &str, path: impl AsRef<Path>) -> Option<MeshId> {
        let loader = &mut self.loader;
        self.meshes.get_or_load(name, || loader.load_mesh(path.as_ref()))
    }

    pub fn load_level(&mut self, name: &str, path: impl AsRef<Path>) -> Option<Level> {
        self.levels
            .get_or_load(name, || Ok(Level::load(path.as_ref())?))
    }

    pub fn texture(&self, name: &str) -> Option<TextureId> {
        self.textures.get(name)
    }

    pub fn shader(&self, name: &str) -> Option<ShaderId> {
        self.shaders.get(name)
    }

    pub fn mesh(&self, name: &str) -> Option<MeshId> {
        self.meshes.get(name)
    }

    /// Drop every cached handle
    pub fn clear(&mut self) {
        self.textures.clear();
        self.shaders.clear();
        self.meshes.clear();
        self.levels.clear();
    }
}

/// Loader without a GPU: hands out sequential handles
#[derive(Debug, Clone, Default)]
pub struct HeadlessLoader {
    next_id: u32,
    /// Number of loader calls made
    pub loads: usize,
}

impl HeadlessLoader {
    fn next(&mut self, path: &Path) -> Result<u32, ResourceError> {
        if path.as_os_str().is_empty() {
            return Err(ResourceError::NotFound(path.to_path_buf()));
        }
        self.loads += 1;
        let id = self.next_id;
        self.next_id += 1;
        Ok(id)
    }
}

impl AssetLoader for HeadlessLoader {
    fn load_texture(&mut self, path: &Path, _alpha: bool) -> Result<TextureId, ResourceError> {
        self.next(path).map(TextureId)
    }

    fn load_shader(&mut self, vertex: &Path, fragment: &Path) -> Result<ShaderId, ResourceError> {
        self.next(fragment)?;
        self.next(vertex).map(ShaderId)
    }

    fn load_mesh(&mut self, path: &Path) -> Result<MeshId, ResourceError> {
        self.next(path).map(MeshId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_load_reuses_handle() {
        let mut resources = ResourceManager::new(HeadlessLoader::default());
        let first = resources.load_texture("ball", "textures/awesomeface.png", true);
        let again = resources.load_texture("ball", "textures/other.png", true);
        assert!(first.is_some());
        assert_eq!(first, again);
        assert_eq!(resources.loader().loads, 1);
        assert_eq!(resources.texture("ball"), first);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let mut resources = ResourceManager::new(HeadlessLoader::default());
        assert_eq!(resources.load_mesh("teapot", ""), None);
        assert!(!resources.meshes.contains("teapot"));
        assert!(resources.load_mesh("teapot", "models/teapot.obj").is_some());
        assert_eq!(resources.meshes.len(), 1);
    }

    #[test]
    fn test_unknown_name_is_none() {
        let resources = ResourceManager::new(HeadlessLoader::default());
        assert_eq!(resources.shader("sprite"), None);
        assert_eq!(resources.mesh("table"), None);
    }

    #[test]
    fn test_shader_needs_both_stages() {
        let mut resources = ResourceManager::new(HeadlessLoader::default());
        assert_eq!(resources.load_shader("sprite", "shaders/sprite.vs", ""), None);
        assert!(resources.load_shader("sprite", "shaders/sprite.vs", "shaders/sprite.fs").is_some());
    }

    #[test]
    fn test_missing_level_file() {
        let mut resources = ResourceManager::new(HeadlessLoader::default());
        assert!(resources.load_level("five", "levels/five.lvl").is_none());
        assert!(resources.levels.is_empty());
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut resources = ResourceManager::new(HeadlessLoader::default());
        resources.load_texture("block", "textures/block.png", false);
        resources.clear();
        assert!(resources.textures.is_empty());
        resources.load_texture("block", "textures/block.png", false);
        assert_eq!(resources.loader().loads, 2);
    }
}
