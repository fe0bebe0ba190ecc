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

    framebuffer::sprites.rs

    Sprite builders convert between attribute matrices and the byte arrays
    stored by GET and read by PUT.

    An array starts with a four byte header: two little-endian words holding
    the x dimension and the height. Packed adapters store the x dimension in
    bits (width * bpp) and pack each row; planar adapters store the width in
    pixels and store each row as one 1bpp row per plane.

*/

use crate::{
    bytematrix::{pack_bytes, unpack_bytes, ByteMatrix},
    error::MatrixError,
};

const HEADER_SIZE: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteBuilder {
    Packed { bits_per_pixel: u32 },
    Planed { bits_per_pixel: u32 },
}

impl SpriteBuilder {
    pub fn bits_per_pixel(&self) -> u32 {
        match self {
            SpriteBuilder::Packed { bits_per_pixel } | SpriteBuilder::Planed { bits_per_pixel } => *bits_per_pixel,
        }
    }

    fn row_bytes(&self, width: usize) -> usize {
        match *self {
            SpriteBuilder::Packed { bits_per_pixel } => (width * bits_per_pixel as usize).div_ceil(8),
            SpriteBuilder::Planed { bits_per_pixel } => bits_per_pixel as usize * width.div_ceil(8),
        }
    }

    /// Size in bytes of the array needed to store a sprite, header included.
    pub fn array_size(&self, width: usize, height: usize) -> usize {
        HEADER_SIZE + height * self.row_bytes(width)
    }

    /// Encode a sprite into a GET array.
    pub fn pack(&self, sprite: &ByteMatrix) -> Result<Vec<u8>, MatrixError> {
        let width = sprite.width();
        let x_dim = match *self {
            SpriteBuilder::Packed { bits_per_pixel } => width * bits_per_pixel as usize,
            SpriteBuilder::Planed { .. } => width,
        };
        let header_word = |value: usize, what: &str| {
            u16::try_from(value)
                .map_err(|_| MatrixError::Shape(format!("sprite {} {} does not fit in an array header", what, value)))
        };
        let x_word = header_word(x_dim, "x dimension")?;
        let height_word = header_word(sprite.height(), "height")?;

        let mut array = Vec::with_capacity(self.array_size(width, sprite.height()));
        array.extend_from_slice(&x_word.to_le_bytes());
        array.extend_from_slice(&height_word.to_le_bytes());

        match *self {
            SpriteBuilder::Packed { bits_per_pixel } => {
                let items_per_byte = 8 / bits_per_pixel.max(1) as usize;
                for row in sprite.rows() {
                    let mut row = row.to_vec();
                    row.resize(row.len().div_ceil(items_per_byte) * items_per_byte, 0);
                    array.extend(pack_bytes(&row, items_per_byte)?);
                }
            }
            SpriteBuilder::Planed { bits_per_pixel } => {
                let padded = width.div_ceil(8) * 8;
                for row in sprite.rows() {
                    for plane in 0..bits_per_pixel {
                        let mut bits: Vec<u8> = row.iter().map(|&attr| (attr >> plane) & 1).collect();
                        bits.resize(padded, 0);
                        array.extend(pack_bytes(&bits, 8)?);
                    }
                }
            }
        }
        Ok(array)
    }

    /// Decode a PUT array into a sprite. Trailing bytes beyond the sprite are ignored.
    pub fn unpack(&self, array: &[u8]) -> Result<ByteMatrix, MatrixError> {
        if array.len() < HEADER_SIZE {
            return Err(MatrixError::SpriteHeader(array.len()));
        }
        let x_dim = u16::from_le_bytes([array[0], array[1]]) as usize;
        let height = u16::from_le_bytes([array[2], array[3]]) as usize;
        let width = match *self {
            SpriteBuilder::Packed { bits_per_pixel } => x_dim / bits_per_pixel.max(1) as usize,
            SpriteBuilder::Planed { .. } => x_dim,
        };
        let row_bytes = self.row_bytes(width);
        let body = &array[HEADER_SIZE..];
        if body.len() < height * row_bytes {
            return Err(MatrixError::SpriteHeader(array.len()));
        }

        let mut rows = Vec::with_capacity(height);
        for line in body.chunks_exact(row_bytes.max(1)).take(height) {
            let mut row = match *self {
                SpriteBuilder::Packed { bits_per_pixel } => {
                    unpack_bytes(line, 8 / bits_per_pixel.max(1) as usize)?
                }
                SpriteBuilder::Planed { .. } => {
                    let mut row = vec![0u8; width.div_ceil(8) * 8];
                    for (plane, plane_bytes) in line.chunks_exact(width.div_ceil(8).max(1)).enumerate() {
                        for (attr, bit) in row.iter_mut().zip(unpack_bytes(plane_bytes, 8)?) {
                            *attr |= bit << plane;
                        }
                    }
                    row
                }
            };
            row.truncate(width);
            rows.push(row);
        }
        if width == 0 {
            return Ok(ByteMatrix::default());
        }
        ByteMatrix::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_sprite_header_and_padding() {
        let sb = SpriteBuilder::Packed { bits_per_pixel: 2 };
        let sprite = ByteMatrix::from_rows([[3u8, 2, 1, 0, 3], [1, 1, 1, 1, 1]]).unwrap();
        let array = sb.pack(&sprite).unwrap();
        // 5 pixels at 2bpp = 10 bits wide, 2 bytes per row
        assert_eq!(&array[..4], &[10, 0, 2, 0]);
        assert_eq!(array.len(), sb.array_size(5, 2));
        assert_eq!(&array[4..6], &[0b1110_0100, 0b1100_0000]);
        assert_eq!(sb.unpack(&array).unwrap(), sprite);
    }

    #[test]
    fn planed_sprite_stores_planes_per_row() {
        let sb = SpriteBuilder::Planed { bits_per_pixel: 4 };
        let sprite = ByteMatrix::from_rows([[0x0F, 0x01, 0x02, 0x04, 0x08, 0, 0, 0, 0x05]]).unwrap();
        let array = sb.pack(&sprite).unwrap();
        assert_eq!(&array[..4], &[9, 0, 1, 0]);
        // 9 pixels need 2 bytes per plane
        assert_eq!(array.len(), 4 + 4 * 2);
        assert_eq!(&array[4..6], &[0b1100_0000, 0b1000_0000]);
        assert_eq!(&array[6..8], &[0b1010_0000, 0]);
        assert_eq!(sb.unpack(&array).unwrap(), sprite);
    }

    #[test]
    fn short_array_is_rejected() {
        let sb = SpriteBuilder::Packed { bits_per_pixel: 1 };
        assert_eq!(sb.unpack(&[1, 0]), Err(MatrixError::SpriteHeader(2)));
        assert_eq!(sb.unpack(&[16, 0, 4, 0, 0xFF]), Err(MatrixError::SpriteHeader(5)));
    }

    #[test]
    fn oversized_sprite_is_rejected() {
        // 20000 pixels at 4bpp is 80000 bits across
        let wide = ByteMatrix::new(20_000, 1, 0u8).unwrap();
        let sb = SpriteBuilder::Packed { bits_per_pixel: 4 };
        assert!(matches!(sb.pack(&wide), Err(MatrixError::Shape(_))));
        assert!(SpriteBuilder::Planed { bits_per_pixel: 4 }.pack(&wide).is_ok());

        let tall = ByteMatrix::new(1, 70_000, 0u8).unwrap();
        assert!(matches!(
            SpriteBuilder::Planed { bits_per_pixel: 1 }.pack(&tall),
            Err(MatrixError::Shape(_))
        ));
    }
}
