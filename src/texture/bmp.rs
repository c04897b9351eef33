use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::RoverError;

/// A decoded texture image, already expanded to RGBA for upload.
pub struct BmpImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Load a texture from a BMP file.
///
/// The contract is strict and every violation is fatal: the file must be an
/// uncompressed 24-bit-per-pixel bitmap with exactly one color plane, and
/// its dimensions must fit within `max_size` (the surface's maximum texture
/// size). Pixel data is stored BGR and is swapped to RGB here.
pub fn load_bmp(path: &Path, max_size: u32) -> Result<BmpImage, RoverError> {
    let file = File::open(path).map_err(|e| RoverError::texture_open(path, e))?;
    let mut r = BufReader::new(file);

    let magic = r
        .read_u16::<LittleEndian>()
        .map_err(|e| RoverError::texture_read("magic", path, e))?;
    if magic != 0x4D42 {
        return Err(RoverError::TextureMagic { path: path.into() });
    }

    // Header: skip to the pixel-data offset, then the dimension and format
    // fields of the info header.
    let read_header = |r: &mut BufReader<File>| -> std::io::Result<(u32, u32, u32, u16, u16, u32)> {
        r.seek(SeekFrom::Current(8))?;
        let off = r.read_u32::<LittleEndian>()?;
        r.seek(SeekFrom::Current(4))?;
        let dx = r.read_u32::<LittleEndian>()?;
        let dy = r.read_u32::<LittleEndian>()?;
        let planes = r.read_u16::<LittleEndian>()?;
        let bpp = r.read_u16::<LittleEndian>()?;
        let compression = r.read_u32::<LittleEndian>()?;
        Ok((off, dx, dy, planes, bpp, compression))
    };
    let (off, dx, dy, planes, bpp, compression) =
        read_header(&mut r).map_err(|e| RoverError::texture_read("header", path, e))?;

    if dx < 1 || dx > max_size {
        return Err(RoverError::TextureDimension {
            path: path.into(),
            axis: "width",
            value: dx,
            max: max_size,
        });
    }
    if dy < 1 || dy > max_size {
        return Err(RoverError::TextureDimension {
            path: path.into(),
            axis: "height",
            value: dy,
            max: max_size,
        });
    }
    if planes != 1 {
        return Err(RoverError::TexturePlanes {
            path: path.into(),
            value: planes,
        });
    }
    if bpp != 24 {
        return Err(RoverError::TextureDepth {
            path: path.into(),
            value: bpp,
        });
    }
    if compression != 0 {
        return Err(RoverError::TextureCompressed { path: path.into() });
    }

    let size = 3 * dx as usize * dy as usize;
    let mut bgr = vec![0u8; size];
    r.seek(SeekFrom::Start(off as u64))
        .and_then(|_| r.read_exact(&mut bgr))
        .map_err(|e| RoverError::texture_read("data", path, e))?;

    // BGR -> RGBA
    let mut rgba = Vec::with_capacity(4 * dx as usize * dy as usize);
    for px in bgr.chunks_exact(3) {
        rgba.extend_from_slice(&[px[2], px[1], px[0], 255]);
    }

    Ok(BmpImage {
        width: dx,
        height: dy,
        rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Write;

    /// Assemble a minimal valid 24bpp BMP in memory.
    fn write_bmp(path: &Path, width: u32, height: u32, bpp: u16, compression: u32) {
        let mut data = Vec::new();
        data.write_u16::<LittleEndian>(0x4D42).unwrap();
        data.write_u32::<LittleEndian>(0).unwrap(); // file size, unchecked
        data.write_u32::<LittleEndian>(0).unwrap(); // reserved
        data.write_u32::<LittleEndian>(54).unwrap(); // pixel data offset
        data.write_u32::<LittleEndian>(40).unwrap(); // info header size
        data.write_u32::<LittleEndian>(width).unwrap();
        data.write_u32::<LittleEndian>(height).unwrap();
        data.write_u16::<LittleEndian>(1).unwrap(); // planes
        data.write_u16::<LittleEndian>(bpp).unwrap();
        data.write_u32::<LittleEndian>(compression).unwrap();
        while data.len() < 54 {
            data.push(0);
        }
        for i in 0..(width * height) {
            // distinct B, G, R per pixel so channel order is checkable
            data.extend_from_slice(&[10 + i as u8, 20 + i as u8, 30 + i as u8]);
        }
        let mut f = File::create(path).unwrap();
        f.write_all(&data).unwrap();
    }

    #[test]
    fn loads_and_swaps_bgr_to_rgba() {
        let dir = std::env::temp_dir();
        let path = dir.join("rovervis_bmp_ok.bmp");
        write_bmp(&path, 2, 2, 24, 0);
        let img = load_bmp(&path, 4096).unwrap();
        assert_eq!((img.width, img.height), (2, 2));
        assert_eq!(&img.rgba[0..4], &[30, 20, 10, 255]);
    }

    #[test]
    fn rejects_wrong_bit_depth() {
        let path = std::env::temp_dir().join("rovervis_bmp_depth.bmp");
        write_bmp(&path, 2, 2, 32, 0);
        match load_bmp(&path, 4096) {
            Err(RoverError::TextureDepth { value, .. }) => assert_eq!(value, 32),
            other => panic!("expected TextureDepth, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn rejects_compressed_data() {
        let path = std::env::temp_dir().join("rovervis_bmp_rle.bmp");
        write_bmp(&path, 2, 2, 24, 1);
        assert!(matches!(
            load_bmp(&path, 4096),
            Err(RoverError::TextureCompressed { .. })
        ));
    }

    #[test]
    fn rejects_oversized_image() {
        let path = std::env::temp_dir().join("rovervis_bmp_big.bmp");
        write_bmp(&path, 8, 2, 24, 0);
        assert!(matches!(
            load_bmp(&path, 4),
            Err(RoverError::TextureDimension { axis: "width", .. })
        ));
    }

    #[test]
    fn rejects_missing_file() {
        let path = std::env::temp_dir().join("rovervis_bmp_missing.bmp");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            load_bmp(&path, 4096),
            Err(RoverError::TextureOpen { .. })
        ));
    }

    #[test]
    fn rejects_wrong_magic() {
        let path = std::env::temp_dir().join("rovervis_bmp_magic.bmp");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"PNG?definitely not a bitmap").unwrap();
        assert!(matches!(
            load_bmp(&path, 4096),
            Err(RoverError::TextureMagic { .. })
        ));
    }
}
