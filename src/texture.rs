pub mod bmp;
pub mod manager;

/// Opaque handle to a texture uploaded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Explicit texture reference for a draw batch. `Default` resolves to the
/// support texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureRef {
    /// No texture; the vertex color carries the palette.
    Untextured,
    /// The default support texture.
    Default,
    Handle(TextureId),
}

impl TextureRef {
    pub fn resolve(self, textures: &manager::SceneTextures) -> Option<TextureId> {
        match self {
            TextureRef::Untextured => None,
            TextureRef::Default => Some(textures.support),
            TextureRef::Handle(id) => Some(id),
        }
    }
}
