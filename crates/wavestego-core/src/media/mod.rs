//! The boundary between the codec and wherever grids come from or go to.
//!
//! The codec itself never encodes or decodes file formats. Carriers are read
//! through a [`GridSource`], stego grids are handed to a [`GridSink`] after
//! they were clipped to 8 bit samples. Lossy formats like JPEG destroy the
//! least significant bits the message lives in, a sink must preserve every
//! sample exactly.

pub mod image_file;
pub mod synthetic;

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

pub use image_file::ImageFile;

use crate::grid::IntensityGrid;
use crate::result::Result;

/// Provides a carrier grid.
pub trait GridSource: Debug {
    fn read_grid(&mut self) -> Result<IntensityGrid>;
}

/// Takes a stego grid whose samples are within [0, 255].
pub trait GridSink: Debug {
    fn write_grid(&mut self, grid: &IntensityGrid) -> Result<()>;
}

impl GridSource for IntensityGrid {
    fn read_grid(&mut self) -> Result<IntensityGrid> {
        Ok(self.clone())
    }
}

/// Keeps the last written grid in memory.
///
/// Clones share the same slot, so a clone handed to a builder can be read
/// back afterwards.
#[derive(Debug, Default, Clone)]
pub struct GridBuffer {
    grid: Rc<RefCell<Option<IntensityGrid>>>,
}

impl GridBuffer {
    /// the last grid written, if any
    pub fn grid(&self) -> Option<IntensityGrid> {
        self.grid.borrow().clone()
    }
}

impl GridSink for GridBuffer {
    fn write_grid(&mut self, grid: &IntensityGrid) -> Result<()> {
        self.grid.replace(Some(grid.clone()));
        Ok(())
    }
}
