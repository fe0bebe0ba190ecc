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

    bytematrix.rs

    Implements a rectangular matrix of bytes, used to move pixel and glyph data
    between the expanded one-byte-per-pixel form and the packed 1, 2, 4 or 8
    bits-per-pixel form the adapters keep in video memory.

*/

use crate::{error::MatrixError, tablegen::BIT_EXPAND_TABLE};
use std::{
    fmt,
    ops::{Index, IndexMut, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive},
};

/// Selects either a single index or a half-open span along one axis of a [ByteMatrix].
/// Spans are clipped to the matrix bounds, like slice ranges that never fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    At(usize),
    Span(Range<usize>),
}

impl From<usize> for Axis {
    fn from(index: usize) -> Self {
        Axis::At(index)
    }
}

impl From<Range<usize>> for Axis {
    fn from(range: Range<usize>) -> Self {
        Axis::Span(range)
    }
}

impl From<RangeFrom<usize>> for Axis {
    fn from(range: RangeFrom<usize>) -> Self {
        Axis::Span(range.start..usize::MAX)
    }
}

impl From<RangeTo<usize>> for Axis {
    fn from(range: RangeTo<usize>) -> Self {
        Axis::Span(0..range.end)
    }
}

impl From<RangeInclusive<usize>> for Axis {
    fn from(range: RangeInclusive<usize>) -> Self {
        Axis::Span(*range.start()..range.end().saturating_add(1))
    }
}

impl From<RangeToInclusive<usize>> for Axis {
    fn from(range: RangeToInclusive<usize>) -> Self {
        Axis::Span(0..range.end.saturating_add(1))
    }
}

impl From<RangeFull> for Axis {
    fn from(_: RangeFull) -> Self {
        Axis::Span(0..usize::MAX)
    }
}

/// Clip a span to [0, len). A span starting past its end is empty.
fn clip(span: &Range<usize>, len: usize) -> Range<usize> {
    let end = span.end.min(len);
    let start = span.start.min(end);
    start..end
}

/// The result of indexing a [ByteMatrix] with [Axis] selectors: a single byte when both
/// axes are indices, otherwise a new matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Byte(u8),
    Matrix(ByteMatrix),
}

impl Selection {
    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Selection::Byte(b) => Some(*b),
            Selection::Matrix(_) => None,
        }
    }

    pub fn into_matrix(self) -> Option<ByteMatrix> {
        match self {
            Selection::Byte(_) => None,
            Selection::Matrix(m) => Some(m),
        }
    }
}

/// Initial contents for [ByteMatrix::new].
#[derive(Clone, Debug)]
pub enum Fill {
    /// Every cell set to one value.
    Byte(u8),
    /// A single row repeated for every row. A one-byte pattern is stretched to the width.
    Row(Vec<u8>),
    /// Explicit rows; there must be `height` rows of `width` bytes.
    Rows(Vec<Vec<u8>>),
    /// Row-major bytes, exactly `width * height` of them.
    Flat(Vec<u8>),
}

impl From<u8> for Fill {
    fn from(b: u8) -> Self {
        Fill::Byte(b)
    }
}

/// A rectangular, row-major matrix of bytes.
///
/// A matrix with zero width and zero height is the canonical empty matrix and holds no
/// storage. All transformations return new matrices; only the `set` family mutates.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteMatrix {
    width:  usize,
    height: usize,
    data:   Vec<u8>,
}

impl ByteMatrix {
    /// Create a new matrix of the given dimensions from one of the [Fill] sources.
    pub fn new(width: usize, height: usize, fill: impl Into<Fill>) -> Result<ByteMatrix, MatrixError> {
        if width == 0 && height == 0 {
            return Ok(ByteMatrix::default());
        }
        match fill.into() {
            Fill::Byte(b) => Ok(ByteMatrix::filled(width, height, b)),
            Fill::Row(row) => {
                let row = if row.len() == 1 { vec![row[0]; width] } else { row };
                if row.len() != width {
                    return Err(MatrixError::Shape(format!(
                        "row pattern of {} bytes does not fit width {}",
                        row.len(),
                        width
                    )));
                }
                let mut data = Vec::with_capacity(width * height);
                for _ in 0..height {
                    data.extend_from_slice(&row);
                }
                Ok(ByteMatrix { width, height, data })
            }
            Fill::Rows(rows) => {
                if rows.len() != height {
                    return Err(MatrixError::Shape(format!(
                        "{} rows supplied for a matrix of height {}",
                        rows.len(),
                        height
                    )));
                }
                let matrix = ByteMatrix::from_rows(rows)?;
                if matrix.width != width {
                    return Err(MatrixError::Shape(format!(
                        "rows of {} bytes supplied for a matrix of width {}",
                        matrix.width, width
                    )));
                }
                Ok(matrix)
            }
            Fill::Flat(data) => {
                if data.len() != width * height {
                    return Err(MatrixError::Shape(format!(
                        "{} bytes supplied for a {}x{} matrix",
                        data.len(),
                        width,
                        height
                    )));
                }
                Ok(ByteMatrix { width, height, data })
            }
        }
    }

    /// Create a matrix with every cell set to `fill`.
    pub fn filled(width: usize, height: usize, fill: u8) -> ByteMatrix {
        if width == 0 && height == 0 {
            return ByteMatrix::default();
        }
        ByteMatrix {
            width,
            height,
            data: vec![fill; width * height],
        }
    }

    /// Build a matrix from a sequence of rows, which must all have the same length.
    pub fn from_rows<I, R>(rows: I) -> Result<ByteMatrix, MatrixError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut width = None;
        let mut height = 0;
        let mut data = Vec::new();
        for row in rows {
            let row = row.as_ref();
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(MatrixError::Shape(format!(
                        "matrix rows must all be the same length: row {} has {} bytes, expected {}",
                        height,
                        row.len(),
                        w
                    )));
                }
                Some(_) => {}
            }
            data.extend_from_slice(row);
            height += 1;
        }
        Ok(ByteMatrix {
            width: width.unwrap_or(0),
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of all bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.height).map(move |y| self.row_slice(y))
    }

    #[inline]
    fn row_slice(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    fn row_slice_mut(&mut self, y: usize) -> &mut [u8] {
        &mut self.data[y * self.width..(y + 1) * self.width]
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> MatrixError {
        MatrixError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Return the byte at column `x`, row `y`.
    pub fn byte(&self, x: usize, y: usize) -> Result<u8, MatrixError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(self.data[y * self.width + x])
    }

    /// Return column `x` of the rows in `ys` as a one-column matrix.
    pub fn column(&self, x: usize, ys: Range<usize>) -> Result<ByteMatrix, MatrixError> {
        if x >= self.width {
            return Err(self.out_of_bounds(x, ys.start));
        }
        let ys = clip(&ys, self.height);
        ByteMatrix::from_rows(ys.map(|y| [self.data[y * self.width + x]]))
    }

    /// Return the bytes in `xs` of row `y` as a one-row matrix.
    pub fn row(&self, xs: Range<usize>, y: usize) -> Result<ByteMatrix, MatrixError> {
        if y >= self.height {
            return Err(self.out_of_bounds(xs.start, y));
        }
        let xs = clip(&xs, self.width);
        ByteMatrix::from_rows([&self.row_slice(y)[xs]])
    }

    /// Return the rectangular sub-matrix spanned by `xs` and `ys`.
    pub fn block(&self, xs: Range<usize>, ys: Range<usize>) -> ByteMatrix {
        let xs = clip(&xs, self.width);
        let ys = clip(&ys, self.height);
        let mut data = Vec::with_capacity(xs.len() * ys.len());
        for y in ys.clone() {
            data.extend_from_slice(&self.row_slice(y)[xs.clone()]);
        }
        ByteMatrix {
            width: if ys.is_empty() { 0 } else { xs.len() },
            height: ys.len(),
            data,
        }
    }

    /// Index the matrix by column and row selectors.
    pub fn get(&self, x: impl Into<Axis>, y: impl Into<Axis>) -> Result<Selection, MatrixError> {
        match (x.into(), y.into()) {
            (Axis::At(x), Axis::At(y)) => self.byte(x, y).map(Selection::Byte),
            (Axis::At(x), Axis::Span(ys)) => self.column(x, ys).map(Selection::Matrix),
            (Axis::Span(xs), Axis::At(y)) => self.row(xs, y).map(Selection::Matrix),
            (Axis::Span(xs), Axis::Span(ys)) => Ok(Selection::Matrix(self.block(xs, ys))),
        }
    }

    /// Set the byte at column `x`, row `y`.
    pub fn set_byte(&mut self, x: usize, y: usize, value: u8) -> Result<(), MatrixError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        self.data[y * self.width + x] = value;
        Ok(())
    }

    /// Assign `value` to the cells selected by `x` and `y`.
    ///
    /// With a row span, `value` must supply one row per selected row. With only a column
    /// span, `value` must be a single row. A one-byte source row is broadcast over a
    /// column span. Nothing is written unless the whole assignment fits.
    pub fn set(&mut self, x: impl Into<Axis>, y: impl Into<Axis>, value: &ByteMatrix) -> Result<(), MatrixError> {
        match (x.into(), y.into()) {
            (Axis::At(x), Axis::At(y)) => {
                if value.width != 1 || value.height != 1 {
                    return Err(MatrixError::Shape(format!(
                        "cannot assign a {}x{} matrix to a single cell",
                        value.width, value.height
                    )));
                }
                self.set_byte(x, y, value.data[0])
            }
            (x, Axis::Span(ys)) => {
                let ys = clip(&ys, self.height);
                if value.height != ys.len() {
                    return Err(MatrixError::Shape(format!(
                        "{} rows supplied for {} selected rows",
                        value.height,
                        ys.len()
                    )));
                }
                if value.height > 0 {
                    self.check_row_fit(&x, ys.start, value.width)?;
                }
                for (y, src) in ys.zip(value.rows()) {
                    self.write_row(&x, y, src);
                }
                Ok(())
            }
            (x, Axis::At(y)) => {
                if y >= self.height {
                    return Err(self.out_of_bounds(0, y));
                }
                if value.height != 1 {
                    return Err(MatrixError::Shape(format!(
                        "{} rows supplied for a single row",
                        value.height
                    )));
                }
                self.check_row_fit(&x, y, value.width)?;
                self.write_row(&x, y, value.row_slice(0));
                Ok(())
            }
        }
    }

    fn check_row_fit(&self, x: &Axis, y: usize, src_len: usize) -> Result<(), MatrixError> {
        match x {
            Axis::At(x) => {
                if *x >= self.width {
                    return Err(self.out_of_bounds(*x, y));
                }
                if src_len != 1 {
                    return Err(MatrixError::Shape(format!(
                        "{} bytes supplied for a single column",
                        src_len
                    )));
                }
            }
            Axis::Span(xs) => {
                let span = clip(xs, self.width).len();
                if src_len != span && src_len != 1 {
                    return Err(MatrixError::Shape(format!(
                        "{} bytes supplied for {} selected columns",
                        src_len, span
                    )));
                }
            }
        }
        Ok(())
    }

    // Only called after check_row_fit() has passed.
    fn write_row(&mut self, x: &Axis, y: usize, src: &[u8]) {
        match x {
            Axis::At(x) => {
                let w = self.width;
                self.data[y * w + *x] = src[0];
            }
            Axis::Span(xs) => {
                let xs = clip(xs, self.width);
                let dst = &mut self.row_slice_mut(y)[xs];
                if src.len() == dst.len() {
                    dst.copy_from_slice(src);
                }
                else {
                    dst.fill(src[0]);
                }
            }
        }
    }

    /// Unpack bit-packed pixel data into a matrix of `height` rows, one byte per item.
    pub fn from_packed(packed: &[u8], height: usize, items_per_byte: usize) -> Result<ByteMatrix, MatrixError> {
        let data = unpack_bytes(packed, items_per_byte)?;
        if data.is_empty() {
            return Ok(ByteMatrix::default());
        }
        if height == 0 || data.len() % height != 0 {
            return Err(MatrixError::Shape(format!(
                "{} packed bytes do not divide into {} rows",
                packed.len(),
                height
            )));
        }
        Ok(ByteMatrix {
            width: data.len() / height,
            height,
            data,
        })
    }

    /// Pack all rows, concatenated, into the packed-bits representation.
    pub fn packed(&self, items_per_byte: usize) -> Result<Vec<u8>, MatrixError> {
        pack_bytes(&self.data, items_per_byte)
    }

    /// Unpack from a hexadecimal representation of packed bytes.
    pub fn from_hex(digits: &str, height: usize, items_per_byte: usize) -> Result<ByteMatrix, MatrixError> {
        let packed = hex::decode(digits).map_err(|e| MatrixError::Hex(e.to_string()))?;
        ByteMatrix::from_packed(&packed, height, items_per_byte)
    }

    /// Pack to a lowercase hexadecimal representation.
    pub fn to_hex(&self, items_per_byte: usize) -> Result<String, MatrixError> {
        Ok(hex::encode(self.packed(items_per_byte)?))
    }

    /// Turn a bitmap of 0/1 values into attributes: 0 becomes `back`, 1 becomes `fore`.
    pub fn render(&self, back: u8, fore: u8) -> ByteMatrix {
        ByteMatrix {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .map(|&b| match b {
                    0 => back,
                    1 => fore,
                    other => other,
                })
                .collect(),
        }
    }

    /// Append `by_width` columns of `fill` to every row.
    pub fn hextend(&self, by_width: usize, fill: u8) -> ByteMatrix {
        let width = self.width + by_width;
        let mut data = Vec::with_capacity(width * self.height);
        for row in self.rows() {
            data.extend_from_slice(row);
            data.resize(data.len() + by_width, fill);
        }
        ByteMatrix {
            width,
            height: self.height,
            data,
        }
    }

    /// Append `by_height` rows of `fill`.
    pub fn vextend(&self, by_height: usize, fill: u8) -> ByteMatrix {
        let mut data = self.data.clone();
        data.resize(self.width * (self.height + by_height), fill);
        ByteMatrix {
            width: self.width,
            height: self.height + by_height,
            data,
        }
    }

    /// Repeat every byte `times` times along the row (00 11 22 ...).
    pub fn hrepeat(&self, times: usize) -> ByteMatrix {
        let mut data = Vec::with_capacity(self.data.len() * times);
        for &b in &self.data {
            data.extend(std::iter::repeat(b).take(times));
        }
        ByteMatrix {
            width: self.width * times,
            height: if times == 0 { 0 } else { self.height },
            data,
        }
    }
}

impl Index<(usize, usize)> for ByteMatrix {
    type Output = u8;

    /// Index by (x, y). Panics if out of bounds.
    fn index(&self, (x, y): (usize, usize)) -> &u8 {
        assert!(x < self.width, "column {} out of bounds for width {}", x, self.width);
        &self.data[y * self.width + x]
    }
}

impl IndexMut<(usize, usize)> for ByteMatrix {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut u8 {
        assert!(x < self.width, "column {} out of bounds for width {}", x, self.width);
        let w = self.width;
        &mut self.data[y * w + x]
    }
}

impl fmt::Debug for ByteMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteMatrix({}, {}, [", self.width, self.height)?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "\n    '")?;
            for b in row {
                write!(f, "\\x{:02x}", b)?;
            }
            write!(f, "'")?;
        }
        write!(f, " ])")
    }
}

/// Concatenate matrices side by side. All matrices must have the same height.
pub fn hstack<'a>(matrices: impl IntoIterator<Item = &'a ByteMatrix>) -> Result<ByteMatrix, MatrixError> {
    let matrices: Vec<&ByteMatrix> = matrices.into_iter().collect();
    let Some(first) = matrices.first()
    else {
        return Ok(ByteMatrix::default());
    };
    let height = first.height;
    if let Some(odd) = matrices.iter().find(|m| m.height != height) {
        return Err(MatrixError::Shape(format!(
            "cannot hstack matrices of height {} and {}",
            height, odd.height
        )));
    }
    let width = matrices.iter().map(|m| m.width).sum();
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for m in &matrices {
            data.extend_from_slice(m.row_slice(y));
        }
    }
    Ok(ByteMatrix { width, height, data })
}

/// Concatenate matrices top to bottom. All matrices must have the same width.
pub fn vstack<'a>(matrices: impl IntoIterator<Item = &'a ByteMatrix>) -> Result<ByteMatrix, MatrixError> {
    let matrices: Vec<&ByteMatrix> = matrices.into_iter().collect();
    let Some(first) = matrices.first()
    else {
        return Ok(ByteMatrix::default());
    };
    let width = first.width;
    if let Some(odd) = matrices.iter().find(|m| m.width != width) {
        return Err(MatrixError::Shape(format!(
            "cannot vstack matrices of width {} and {}",
            width, odd.width
        )));
    }
    let height = matrices.iter().map(|m| m.height).sum();
    let mut data = Vec::with_capacity(width * height);
    for m in &matrices {
        data.extend_from_slice(&m.data);
    }
    Ok(ByteMatrix { width, height, data })
}

/// Bits per item for a packing density.
pub fn bits_per_item(items_per_byte: usize) -> Result<usize, MatrixError> {
    match items_per_byte {
        1 | 2 | 4 | 8 => Ok(8 / items_per_byte),
        _ => Err(MatrixError::ItemsPerByte(items_per_byte)),
    }
}

/// Split each packed byte into `items_per_byte` values, most significant bits first.
pub fn unpack_bytes(packed: &[u8], items_per_byte: usize) -> Result<Vec<u8>, MatrixError> {
    let bpp = bits_per_item(items_per_byte)?;
    let mut unpacked = Vec::with_capacity(packed.len() * items_per_byte);
    if bpp == 1 {
        for &byte in packed {
            unpacked.extend_from_slice(&BIT_EXPAND_TABLE[byte as usize]);
        }
        return Ok(unpacked);
    }
    let mask = ((1u16 << bpp) - 1) as u8;
    for &byte in packed {
        for i in 0..items_per_byte {
            unpacked.push((byte >> (8 - bpp - i * bpp)) & mask);
        }
    }
    Ok(unpacked)
}

/// Pack groups of `items_per_byte` values into bytes, most significant bits first.
/// A trailing partial group is dropped.
pub fn pack_bytes(unpacked: &[u8], items_per_byte: usize) -> Result<Vec<u8>, MatrixError> {
    let bpp = bits_per_item(items_per_byte)?;
    let mask = ((1u16 << bpp) - 1) as u8;
    Ok(unpacked
        .chunks_exact(items_per_byte)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &v)| acc | ((v & mask) << (8 - bpp - i * bpp)))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ByteMatrix {
        ByteMatrix::new(4, 3, Fill::Flat((0..12).collect())).unwrap()
    }

    #[test]
    fn construct_fills() {
        let m = ByteMatrix::new(3, 2, 7).unwrap();
        assert_eq!(m.as_bytes(), &[7; 6]);

        let m = ByteMatrix::new(3, 2, Fill::Row(vec![1, 2, 3])).unwrap();
        assert_eq!(m.as_bytes(), &[1, 2, 3, 1, 2, 3]);

        let m = ByteMatrix::new(3, 2, Fill::Row(vec![9])).unwrap();
        assert_eq!(m.as_bytes(), &[9; 6]);

        let m = ByteMatrix::new(2, 2, Fill::Rows(vec![vec![1, 2], vec![3, 4]])).unwrap();
        assert_eq!(m.byte(1, 1).unwrap(), 4);

        assert!(ByteMatrix::new(2, 2, Fill::Flat(vec![1, 2, 3])).is_err());
        assert!(ByteMatrix::new(2, 2, Fill::Rows(vec![vec![1, 2], vec![3]])).is_err());
        assert!(ByteMatrix::new(2, 3, Fill::Rows(vec![vec![1, 2], vec![3, 4]])).is_err());
        assert!(ByteMatrix::new(3, 2, Fill::Row(vec![1, 2])).is_err());

        let empty = ByteMatrix::new(0, 0, 5).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty, ByteMatrix::default());
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = ByteMatrix::from_rows(vec![vec![1u8, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, MatrixError::Shape(_)));
        let m = ByteMatrix::from_rows(Vec::<Vec<u8>>::new()).unwrap();
        assert_eq!((m.width(), m.height()), (0, 0));
    }

    #[test]
    fn get_scalar_scalar() {
        let m = sample();
        assert_eq!(m.get(1, 2).unwrap(), Selection::Byte(9));
        assert_eq!(m[(3, 0)], 3);
        assert!(m.get(4, 0).is_err());
        assert!(m.get(0, 3).is_err());
    }

    #[test]
    fn get_scalar_column_range_rows() {
        let m = sample();
        let col = m.get(2, 0..3).unwrap().into_matrix().unwrap();
        assert_eq!((col.width(), col.height()), (1, 3));
        assert_eq!(col.as_bytes(), &[2, 6, 10]);
    }

    #[test]
    fn get_range_columns_scalar_row() {
        let m = sample();
        let row = m.get(1..3, 1).unwrap().into_matrix().unwrap();
        assert_eq!((row.width(), row.height()), (2, 1));
        assert_eq!(row.as_bytes(), &[5, 6]);
    }

    #[test]
    fn get_range_range_clips() {
        let m = sample();
        let block = m.get(2..10, 1..).unwrap().into_matrix().unwrap();
        assert_eq!((block.width(), block.height()), (2, 2));
        assert_eq!(block.as_bytes(), &[6, 7, 10, 11]);

        let outside = m.get(5..8, 0..2).unwrap().into_matrix().unwrap();
        assert_eq!(outside.width(), 0);
        assert!(outside.is_empty());

        let none = m.block(0..4, 7..9);
        assert_eq!((none.width(), none.height()), (0, 0));
    }

    #[test]
    fn set_then_get_returns_value() {
        let mut m = sample();
        for y in 0..m.height() {
            for x in 0..m.width() {
                m.set_byte(x, y, 0xA0 + x as u8).unwrap();
                assert_eq!(m.byte(x, y).unwrap(), 0xA0 + x as u8);
            }
        }
        let one = ByteMatrix::filled(1, 1, 0x55);
        m.set(2, 1, &one).unwrap();
        assert_eq!(m.get(2, 1).unwrap(), Selection::Byte(0x55));
        assert!(m.set_byte(4, 0, 1).is_err());
    }

    #[test]
    fn set_row_spans() {
        let mut m = sample();
        let src = ByteMatrix::from_rows([[0xEE, 0xFF]]).unwrap();
        m.set(1..3, 2, &src).unwrap();
        assert_eq!(m.row(0..4, 2).unwrap().as_bytes(), &[8, 0xEE, 0xFF, 11]);

        let too_wide = ByteMatrix::from_rows([[1, 2, 3]]).unwrap();
        assert!(m.set(1..3, 0, &too_wide).is_err());
        // nothing written
        assert_eq!(m.row(0..4, 0).unwrap().as_bytes(), &[0, 1, 2, 3]);
    }

    #[test]
    fn set_column_over_rows() {
        let mut m = sample();
        let src = ByteMatrix::from_rows([[0xA1], [0xA2]]).unwrap();
        m.set(3, 0..2, &src).unwrap();
        assert_eq!(m.column(3, 0..3).unwrap().as_bytes(), &[0xA1, 0xA2, 11]);

        let wrong = ByteMatrix::from_rows([[1], [2], [3], [4]]).unwrap();
        assert!(m.set(3, 0..2, &wrong).is_err());
    }

    #[test]
    fn set_block_and_broadcast() {
        let mut m = ByteMatrix::filled(4, 4, 0);
        let src = ByteMatrix::from_rows([[1, 2], [3, 4]]).unwrap();
        m.set(1..3, 1..3, &src).unwrap();
        assert_eq!(m.block(1..3, 1..3), src);
        assert_eq!(m[(0, 1)], 0);

        let fill = ByteMatrix::from_rows([[7], [8]]).unwrap();
        m.set(.., 2..4, &fill).unwrap();
        assert_eq!(m.row(0..4, 2).unwrap().as_bytes(), &[7; 4]);
        assert_eq!(m.row(0..4, 3).unwrap().as_bytes(), &[8; 4]);
    }

    #[test]
    fn pack_unpack_identity_all_depths() {
        let bytes: Vec<u8> = (0..=255).collect();
        for items_per_byte in [1, 2, 4, 8] {
            let m = ByteMatrix::from_packed(&bytes, 1, items_per_byte).unwrap();
            assert_eq!(m.width(), 256 * items_per_byte);
            assert_eq!(m.packed(items_per_byte).unwrap(), bytes);
        }
    }

    #[test]
    fn unpack_msb_first() {
        assert_eq!(unpack_bytes(&[0b1000_0001], 8).unwrap(), vec![1, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(unpack_bytes(&[0b1110_0100], 4).unwrap(), vec![3, 2, 1, 0]);
        assert_eq!(unpack_bytes(&[0xA5], 2).unwrap(), vec![0xA, 0x5]);
        assert_eq!(unpack_bytes(&[0xA5], 1).unwrap(), vec![0xA5]);
        assert_eq!(pack_bytes(&[3, 2, 1, 0, 3], 4).unwrap(), vec![0b1110_0100]);
        assert!(matches!(unpack_bytes(&[0], 3), Err(MatrixError::ItemsPerByte(3))));
    }

    #[test]
    fn from_packed_shapes_rows() {
        // A 16x2 1bpp glyph stored as 4 bytes
        let m = ByteMatrix::from_packed(&[0xFF, 0x00, 0x0F, 0xF0], 2, 8).unwrap();
        assert_eq!((m.width(), m.height()), (16, 2));
        assert_eq!(m.row(0..16, 1).unwrap().as_bytes()[4..12], [1, 1, 1, 1, 1, 1, 1, 1]);
        assert!(ByteMatrix::from_packed(&[1, 2, 3], 2, 1).is_err());
    }

    #[test]
    fn hex_round_trip() {
        let m = ByteMatrix::from_hex("00ff18", 3, 8).unwrap();
        assert_eq!((m.width(), m.height()), (8, 3));
        assert_eq!(m.row(0..8, 2).unwrap().as_bytes(), &[0, 0, 0, 1, 1, 0, 0, 0]);
        assert_eq!(m.to_hex(8).unwrap(), "00ff18");
        assert!(ByteMatrix::from_hex("0g", 1, 8).is_err());
        assert!(ByteMatrix::from_hex("abc", 1, 8).is_err());
        // Sign prefixes are not hex digits
        assert!(matches!(ByteMatrix::from_hex("+f", 1, 1), Err(MatrixError::Hex(_))));
        assert!(ByteMatrix::from_hex("-1", 1, 1).is_err());
    }

    #[test]
    fn render_maps_bits_to_attributes() {
        let bits = ByteMatrix::from_rows([[0, 1, 1], [1, 0, 0]]).unwrap();
        let attrs = bits.render(4, 14);
        assert_eq!(attrs.as_bytes(), &[4, 14, 14, 14, 4, 4]);
        assert!(attrs.as_bytes().iter().all(|&a| a == 4 || a == 14));
    }

    #[test]
    fn extend_and_repeat() {
        let m = sample();
        let wide = m.hextend(3, 0xCC);
        assert_eq!(wide.width(), m.width() + 3);
        assert_eq!(wide.block(0..4, 0..3), m);
        assert!(wide.block(4..7, 0..3).as_bytes().iter().all(|&b| b == 0xCC));

        let tall = m.vextend(2, 0xDD);
        assert_eq!(tall.height(), 5);
        assert_eq!(tall.block(0..4, 0..3), m);
        assert_eq!(tall.row(0..4, 4).unwrap().as_bytes(), &[0xDD; 4]);

        let doubled = ByteMatrix::from_rows([[1, 2, 3]]).unwrap().hrepeat(2);
        assert_eq!(doubled.as_bytes(), &[1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn stacking_slices_back() {
        let a = sample();
        let b = ByteMatrix::filled(2, 3, 0x77);
        let h = hstack([&a, &b]).unwrap();
        assert_eq!(h.width(), 6);
        assert_eq!(h.block(0..a.width(), 0..3), a);
        assert_eq!(h.block(a.width()..a.width() + b.width(), 0..3), b);

        let c = ByteMatrix::filled(4, 2, 0x11);
        let v = vstack([&a, &c]).unwrap();
        assert_eq!(v.height(), 5);
        assert_eq!(v.block(0..4, 0..3), a);
        assert_eq!(v.block(0..4, 3..5), c);

        assert!(hstack([&a, &c]).is_err());
        assert!(vstack([&a, &b]).is_err());
        assert_eq!(hstack(std::iter::empty()).unwrap(), ByteMatrix::default());
    }

    #[test]
    fn debug_shows_hex_rows() {
        let m = ByteMatrix::from_rows([[0x01, 0xab]]).unwrap();
        assert_eq!(format!("{:?}", m), "ByteMatrix(2, 1, [\n    '\\x01\\xab' ])");
    }
}
