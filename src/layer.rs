use crate::util::index_from_coords;
use crate::FieldError;
use std::ops::{Index, IndexMut};

/// A single tile layer of a map.
///
/// Tiles are stored row by row, one byte each.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct TileLayer {
    pub(crate) tiles: Vec<u8>,
    pub(crate) width: u16,
    pub(crate) height: u16,
    /// Purpose unknown; kept so it survives a round trip.
    pub flag: u8,
}

impl TileLayer {
    /// Constructs a new, empty layer.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize the layer, keeping the tiles in the overlapping top-left corner.
    ///
    /// New tiles are zeroed. Does nothing if the size is unchanged.
    pub fn set_dimensions(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        let (old_width, old_height) = (self.width as usize, self.height as usize);
        let (new_width, new_height) = (width as usize, height as usize);
        let mut tiles = vec![0; new_width * new_height];
        // Row stride changes with the width, so copy the overlap row by row
        let copy_width = old_width.min(new_width);
        for y in 0..old_height.min(new_height) {
            let old_start = index_from_coords(0, y, old_width);
            let new_start = index_from_coords(0, y, new_width);
            tiles[new_start..new_start + copy_width]
                .copy_from_slice(&self.tiles[old_start..old_start + copy_width]);
        }
        self.tiles = tiles;
        self.width = width;
        self.height = height;
    }

    /// Set the tile at a position.
    ///
    /// # Errors
    /// Errors if the position is outside of the layer. The layer is left unchanged.
    pub fn set_tile(&mut self, x: u16, y: u16, tile: u8) -> Result<(), FieldError> {
        FieldError::check_index("tile layer columns", x as usize, self.width as usize)?;
        FieldError::check_index("tile layer rows", y as usize, self.height as usize)?;
        self[(x, y)] = tile;
        Ok(())
    }

    /// Get a tile by position.
    /// Returns None if out of bounds.
    #[must_use]
    pub fn get(&self, (x, y): (u16, u16)) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self[(x, y)])
    }

    /// Get a tile by position, mutably.
    /// Returns None if out of bounds.
    pub fn get_mut(&mut self, (x, y): (u16, u16)) -> Option<&mut u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(&mut self[(x, y)])
    }

    /// Returns the width of the layer.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Returns the height of the layer.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns the number of tiles in the layer.
    #[inline]
    #[must_use]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns every tile, row by row.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Empties the layer.
    pub fn reset(&mut self) {
        self.width = 0;
        self.height = 0;
        self.flag = 0;
        self.tiles.clear();
    }
}

impl Index<(u16, u16)> for TileLayer {
    type Output = u8;

    /// Index by position and return a reference.
    ///
    /// # Panics
    /// Panics if index is out of bounds.
    fn index(&self, (x, y): (u16, u16)) -> &Self::Output {
        assert!(x < self.width, "column {x} is out of bounds");
        &self.tiles[index_from_coords(x as usize, y as usize, self.width as usize)]
    }
}

impl IndexMut<(u16, u16)> for TileLayer {
    /// Index by position and return a mutable reference.
    ///
    /// # Panics
    /// Panics if index is out of bounds.
    fn index_mut(&mut self, (x, y): (u16, u16)) -> &mut Self::Output {
        assert!(x < self.width, "column {x} is out of bounds");
        &mut self.tiles[index_from_coords(x as usize, y as usize, self.width as usize)]
    }
}

impl IntoIterator for TileLayer {
    type Item = u8;
    type IntoIter = std::vec::IntoIter<u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.into_iter()
    }
}
