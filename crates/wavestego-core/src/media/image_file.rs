use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat};
use log::{debug, error, warn};

use super::{GridSink, GridSource};
use crate::error::SteganoError;
use crate::grid::IntensityGrid;
use crate::result::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

/// A grayscale image file, backed by the `image` crate.
///
/// Reads PNG and JPEG carriers and converts them to 8 bit luma. Writes PNG
/// only, a JPEG target is refused because its compression would wipe out
/// the hidden bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    path: PathBuf,
}

impl ImageFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GridSource for ImageFile {
    fn read_grid(&mut self) -> Result<IntensityGrid> {
        let path = &self.path;
        match ImageKind::from_path(path) {
            Some(ImageKind::Jpeg) => {
                warn!("Reading lossy carrier {path:?}, save the result as PNG")
            }
            Some(ImageKind::Png) => {}
            None => return Err(SteganoError::UnsupportedMedia),
        }

        let luma = image::open(path)
            .map_err(|e| {
                error!("Error opening image {path:?}: {e}");
                SteganoError::InvalidImageMedia
            })?
            .to_luma8();
        let (width, height) = luma.dimensions();
        debug!("loaded {width}x{height} carrier from {path:?}");

        Ok(IntensityGrid::from_luma(
            height as usize,
            width as usize,
            luma.as_raw(),
        )?)
    }
}

impl GridSink for ImageFile {
    fn write_grid(&mut self, grid: &IntensityGrid) -> Result<()> {
        let path = &self.path;
        match ImageKind::from_path(path) {
            Some(ImageKind::Png) => {}
            Some(ImageKind::Jpeg) => {
                let ext = path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default();
                return Err(SteganoError::LossyCarrierFormat(ext));
            }
            None => return Err(SteganoError::UnsupportedMedia),
        }

        let (rows, cols) = grid.dimensions();
        let (Ok(width), Ok(height)) = (u32::try_from(cols), u32::try_from(rows)) else {
            error!("Grid of {rows}x{cols} is too large for an image");
            return Err(SteganoError::ImageEncodingError);
        };
        let image =
            GrayImage::from_raw(width, height, grid.to_luma8()).ok_or(SteganoError::ImageEncodingError)?;

        let file = File::create(path).map_err(|e| {
            error!("Error creating file {path:?}: {e}");
            SteganoError::WriteError { source: e }
        })?;
        image
            .write_to(&mut BufWriter::new(file), ImageFormat::Png)
            .map_err(|e| {
                error!("Error saving image: {e}");
                SteganoError::ImageEncodingError
            })
    }
}
