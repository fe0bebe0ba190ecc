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

    framebuffer::mod.rs

    Memory layout parameters, tile and sprite builders for each adapter family.

*/

mod memory_map;
mod sprites;
mod tiles;

pub use memory_map::*;
pub use sprites::SpriteBuilder;
pub use tiles::TileBuilder;

/// The memory mapper bound to a mode descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemoryMapper {
    Text(TextMemoryMapper),
    Graphics(GraphicsMemoryMapper),
}

impl MemoryMapper {
    pub fn num_pages(&self) -> usize {
        match self {
            MemoryMapper::Text(m) => m.num_pages(),
            MemoryMapper::Graphics(m) => m.num_pages(),
        }
    }

    pub fn page_size(&self) -> usize {
        match self {
            MemoryMapper::Text(m) => m.page_size(),
            MemoryMapper::Graphics(m) => m.page_size(),
        }
    }

    pub fn segment(&self) -> u16 {
        match self {
            MemoryMapper::Text(m) => m.segment(),
            MemoryMapper::Graphics(m) => m.segment(),
        }
    }

    pub fn set_video_mem_size(&mut self, video_mem_size: usize) {
        match self {
            MemoryMapper::Text(m) => m.set_video_mem_size(video_mem_size),
            MemoryMapper::Graphics(m) => m.set_video_mem_size(video_mem_size),
        }
    }
}
