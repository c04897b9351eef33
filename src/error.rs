use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Startup/resource failures. All of these are fatal: they propagate out of
/// `main` and terminate the process. Per-frame surface errors are logged
/// instead, see `render::draw`.
#[derive(Debug, Error)]
pub enum RoverError {
    #[error("cannot open file {}: {source}", path.display())]
    TextureOpen { path: PathBuf, source: io::Error },

    #[error("cannot read {what} from {}: {source}", path.display())]
    TextureRead {
        what: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("image magic not BMP in {}", path.display())]
    TextureMagic { path: PathBuf },

    #[error("{} image {axis} {value} out of range 1-{max}", path.display())]
    TextureDimension {
        path: PathBuf,
        axis: &'static str,
        value: u32,
        max: u32,
    },

    #[error("{} bit planes is not 1: {value}", path.display())]
    TexturePlanes { path: PathBuf, value: u16 },

    #[error("{} bits per pixel is not 24: {value}", path.display())]
    TextureDepth { path: PathBuf, value: u16 },

    #[error("{} compressed files not supported", path.display())]
    TextureCompressed { path: PathBuf },

    #[error("no compatible graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error(transparent)]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error(transparent)]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Os(#[from] winit::error::OsError),
}

impl RoverError {
    pub fn texture_open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RoverError::TextureOpen {
            path: path.into(),
            source,
        }
    }

    pub fn texture_read(what: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        RoverError::TextureRead {
            what,
            path: path.into(),
            source,
        }
    }
}
