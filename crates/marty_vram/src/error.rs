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

    error.rs

    Error types for byte matrix operations and video mode resolution.

*/

use crate::adapter::Adapter;
use thiserror::Error;

/// Structural errors raised by [ByteMatrix](crate::bytematrix::ByteMatrix) construction
/// and transformation. These indicate a programming error in the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Shape mismatch: {0}")]
    Shape(String),
    #[error("Index ({x}, {y}) out of bounds for {width}x{height} matrix")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("Unsupported items per byte: {0}. Expected 1, 2, 4 or 8")]
    ItemsPerByte(usize),
    #[error("Invalid hex data: {0}")]
    Hex(String),
    #[error("Sprite array of {0} bytes is too short")]
    SpriteHeader(usize),
}

/// Mode resolution failures. All of these surface to the interpreter as
/// "Illegal function call"; no fallback mode is ever substituted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    #[error("Illegal function call: adapter {adapter} has no screen mode {number}")]
    NoSuchMode { adapter: Adapter, number: u8 },
    #[error("Illegal function call: adapter {adapter} has no {columns}-column text mode")]
    NoSuchTextWidth { adapter: Adapter, columns: u32 },
    #[error("Illegal function call: adapter {adapter} cannot switch mode {mode} to {columns} columns")]
    NoWidthSwitch {
        adapter: Adapter,
        mode: String,
        columns: u32,
    },
    #[error("Illegal function call: adapter {0} does not allow palette changes")]
    PaletteChange(Adapter),
}

impl ModeError {
    pub fn is_illegal_function_call(&self) -> bool {
        match self {
            ModeError::NoSuchMode { .. }
            | ModeError::NoSuchTextWidth { .. }
            | ModeError::NoWidthSwitch { .. }
            | ModeError::PaletteChange(_) => true,
        }
    }
}
