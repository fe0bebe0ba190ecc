/*
    MartyPC
    https://github.com/dbalsom/martypc

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    framebuffer::tiles.rs

    Fill tile builders. A tile pattern is a byte string, one byte per scan
    line on packed adapters and one byte per plane per scan line on planar
    adapters.

*/

use crate::{
    bytematrix::{bits_per_item, unpack_bytes, ByteMatrix},
    error::MatrixError,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileBuilder {
    Packed { bits_per_pixel: u32 },
    Planed { bits_per_pixel: u32 },
}

impl TileBuilder {
    pub fn bits_per_pixel(&self) -> u32 {
        match self {
            TileBuilder::Packed { bits_per_pixel } | TileBuilder::Planed { bits_per_pixel } => *bits_per_pixel,
        }
    }

    /// Build a tile of attributes from a pattern.
    pub fn build(&self, pattern: &[u8]) -> Result<ByteMatrix, MatrixError> {
        match *self {
            TileBuilder::Packed { bits_per_pixel } => {
                let items_per_byte = 8 / bits_per_pixel.max(1) as usize;
                if bits_per_item(items_per_byte)? != bits_per_pixel as usize {
                    return Err(MatrixError::ItemsPerByte(items_per_byte));
                }
                ByteMatrix::from_packed(pattern, pattern.len(), items_per_byte)
            }
            TileBuilder::Planed { bits_per_pixel } => build_planed(pattern, bits_per_pixel as usize),
        }
    }
}

fn build_planed(pattern: &[u8], bpp: usize) -> Result<ByteMatrix, MatrixError> {
    if bpp == 0 || bpp > 8 {
        return Err(MatrixError::ItemsPerByte(bpp));
    }
    if pattern.is_empty() {
        return Ok(ByteMatrix::default());
    }
    // Pad to whole scan lines
    let mut pattern = pattern.to_vec();
    let short = (bpp - pattern.len() % bpp) % bpp;
    pattern.resize(pattern.len() + short, 0);

    let mut rows = Vec::with_capacity(pattern.len() / bpp);
    for line in pattern.chunks_exact(bpp) {
        let mut row = [0u8; 8];
        for (plane, &byte) in line.iter().enumerate() {
            for (attr, bit) in row.iter_mut().zip(unpack_bytes(&[byte], 8)?) {
                *attr |= bit << plane;
            }
        }
        rows.push(row);
    }
    ByteMatrix::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_tile_two_bpp() {
        let tb = TileBuilder::Packed { bits_per_pixel: 2 };
        let tile = tb.build(&[0b1110_0100, 0xFF]).unwrap();
        assert_eq!((tile.width(), tile.height()), (4, 2));
        assert_eq!(tile.as_bytes(), &[3, 2, 1, 0, 3, 3, 3, 3]);
    }

    #[test]
    fn planed_tile_combines_planes() {
        let tb = TileBuilder::Planed { bits_per_pixel: 4 };
        // plane 0 all set, plane 2 high nibble set; short pattern padded with zeros
        let tile = tb.build(&[0xFF, 0x00, 0xF0]).unwrap();
        assert_eq!((tile.width(), tile.height()), (8, 1));
        assert_eq!(tile.as_bytes(), &[5, 5, 5, 5, 1, 1, 1, 1]);
    }

    #[test]
    fn empty_pattern() {
        assert!(TileBuilder::Planed { bits_per_pixel: 4 }.build(&[]).unwrap().is_empty());
        assert!(TileBuilder::Packed { bits_per_pixel: 1 }.build(&[]).unwrap().is_empty());
    }
}
