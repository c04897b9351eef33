use std::path::Path;

use crate::error::RoverError;
use crate::texture::TextureId;
use crate::texture::bmp::{BmpImage, load_bmp};

/// Handles for the five scene textures, acquired once at startup and held
/// for the life of the process.
#[derive(Debug, Clone, Copy)]
pub struct SceneTextures {
    pub ground: TextureId,
    pub body: TextureId,
    pub support: TextureId,
    pub wheel: TextureId,
    pub drill: TextureId,
}

/// Load every scene texture from `dir`. The returned image list is indexed
/// by `TextureId`, so the backend can register them in order. Any failure is
/// fatal per the loader contract.
pub fn load_scene_textures(
    dir: &Path,
    max_size: u32,
) -> Result<(Vec<BmpImage>, SceneTextures), RoverError> {
    let mut images = Vec::new();
    let mut load = |name: &str| -> Result<TextureId, RoverError> {
        let img = load_bmp(&dir.join(name), max_size)?;
        log::info!("loaded texture {} ({}x{})", name, img.width, img.height);
        let id = TextureId(images.len());
        images.push(img);
        Ok(id)
    };

    let ground = load("ground.bmp")?;
    let body = load("body.bmp")?;
    let support = load("support.bmp")?;
    let wheel = load("wheel.bmp")?;
    let drill = load("drill.bmp")?;

    Ok((
        images,
        SceneTextures {
            ground,
            body,
            support,
            wheel,
            drill,
        },
    ))
}
