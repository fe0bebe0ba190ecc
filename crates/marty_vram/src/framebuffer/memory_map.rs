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

    framebuffer::memory_map.rs

    Memory mapper parameters. These describe how a video mode lays out its
    pages in video memory; the display subsystem uses them to translate
    addresses.

*/

pub const MONO_TEXT_SEGMENT: u16 = 0xB000;
pub const COLOR_TEXT_SEGMENT: u16 = 0xB800;
pub const CGA_SEGMENT: u16 = 0xB800;
pub const EGA_SEGMENT: u16 = 0xA000;

pub const TEXT_PAGE_SIZE_80: usize = 0x1000;
pub const TEXT_PAGE_SIZE_40: usize = 0x0800;

/// Number of bit planes on an EGA/VGA card. Each plane holds a quarter of video memory.
pub const EGA_PLANES: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMemoryMapper {
    rows: u32,
    columns: u32,
    video_mem_size: usize,
    max_pages: usize,
    mono: bool,
    num_pages: usize,
}

impl TextMemoryMapper {
    pub fn new(rows: u32, columns: u32, video_mem_size: usize, max_pages: usize, mono: bool) -> Self {
        let mut mapper = TextMemoryMapper {
            rows,
            columns,
            video_mem_size,
            max_pages,
            mono,
            num_pages: 0,
        };
        mapper.recalc_pages();
        mapper
    }

    fn recalc_pages(&mut self) {
        self.num_pages = std::cmp::max(1, std::cmp::min(self.max_pages, self.video_mem_size / self.page_size()));
    }

    /// Bytes per text page: a character and an attribute byte per cell, rounded up to
    /// the CRTC page boundary.
    pub fn page_size(&self) -> usize {
        if self.columns == 80 {
            TEXT_PAGE_SIZE_80
        }
        else {
            TEXT_PAGE_SIZE_40
        }
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    pub fn segment(&self) -> u16 {
        if self.mono {
            MONO_TEXT_SEGMENT
        }
        else {
            COLOR_TEXT_SEGMENT
        }
    }

    pub fn bytes_per_row(&self) -> usize {
        self.columns as usize * 2
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn set_video_mem_size(&mut self, video_mem_size: usize) {
        self.video_mem_size = video_mem_size;
        self.recalc_pages();
    }
}

/// How a graphics mode arranges pixels in memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemoryLayout {
    /// Packed pixels with scan lines interleaved across banks.
    Cga,
    /// One bit per pixel in each of up to four planes.
    Ega,
    /// Tandy/PCjr 640x200x4: two 1bpp planes interleaved byte by byte.
    Tandy6,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphicsMemoryMapper {
    layout: MemoryLayout,
    width: u32,
    height: u32,
    video_mem_size: usize,
    max_pages: Option<usize>,
    interleave_times: usize,
    bank_size: usize,
    bits_per_pixel: u32,
    planes_used: Vec<u8>,
    num_pages: usize,
}

impl GraphicsMemoryMapper {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        layout: MemoryLayout,
        width: u32,
        height: u32,
        video_mem_size: usize,
        max_pages: Option<usize>,
        interleave_times: usize,
        bank_size: usize,
        bits_per_pixel: u32,
    ) -> Self {
        let mut mapper = GraphicsMemoryMapper {
            layout,
            width,
            height,
            video_mem_size,
            max_pages,
            interleave_times,
            bank_size,
            bits_per_pixel,
            planes_used: (0..EGA_PLANES as u8).collect(),
            num_pages: 0,
        };
        mapper.recalc_pages();
        mapper
    }

    fn recalc_pages(&mut self) {
        let page_size = self.page_size();
        let available = match self.layout {
            // Each plane gets a quarter of video memory
            MemoryLayout::Ega => self.video_mem_size / (EGA_PLANES * page_size),
            MemoryLayout::Cga | MemoryLayout::Tandy6 => self.video_mem_size / page_size,
        };
        self.num_pages = match self.max_pages {
            Some(max) => available.min(max),
            None => available,
        };
        if self.num_pages == 0 {
            log::warn!(
                "Video memory of {} bytes holds no {}x{} page",
                self.video_mem_size,
                self.width,
                self.height
            );
        }
    }

    #[inline]
    pub fn layout(&self) -> MemoryLayout {
        self.layout
    }

    pub fn page_size(&self) -> usize {
        self.interleave_times * self.bank_size
    }

    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    pub fn interleave_times(&self) -> usize {
        self.interleave_times
    }

    pub fn bank_size(&self) -> usize {
        self.bank_size
    }

    pub fn segment(&self) -> u16 {
        match self.layout {
            MemoryLayout::Ega => EGA_SEGMENT,
            MemoryLayout::Cga | MemoryLayout::Tandy6 => CGA_SEGMENT,
        }
    }

    /// Bytes per scan line. For the planar layout this is per plane.
    pub fn bytes_per_row(&self) -> usize {
        match self.layout {
            MemoryLayout::Ega => self.width as usize / 8,
            MemoryLayout::Cga | MemoryLayout::Tandy6 => (self.width * self.bits_per_pixel) as usize / 8,
        }
    }

    pub fn set_video_mem_size(&mut self, video_mem_size: usize) {
        self.video_mem_size = video_mem_size;
        self.recalc_pages();
    }

    /// Restrict the bit planes in use. Only meaningful for the planar layout.
    pub fn set_planes_used(&mut self, planes: &[u8]) {
        self.planes_used = planes.to_vec();
    }

    pub fn planes_used(&self) -> &[u8] {
        &self.planes_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_pages_capped_by_memory() {
        let m = TextMemoryMapper::new(25, 80, 0x4000, 4, false);
        assert_eq!(m.num_pages(), 4);
        assert_eq!(m.segment(), 0xB800);

        let mut m = TextMemoryMapper::new(25, 40, 0x1000, 8, true);
        assert_eq!(m.num_pages(), 2);
        assert_eq!(m.segment(), 0xB000);
        m.set_video_mem_size(0x100);
        assert_eq!(m.num_pages(), 1);
    }

    #[test]
    fn cga_pages() {
        let m = GraphicsMemoryMapper::new(MemoryLayout::Cga, 320, 200, 0x4000, Some(1), 2, 0x2000, 2);
        assert_eq!(m.page_size(), 0x4000);
        assert_eq!(m.num_pages(), 1);
        assert_eq!(m.bytes_per_row(), 80);

        let mut m = GraphicsMemoryMapper::new(MemoryLayout::Cga, 320, 200, 0x20000, Some(8), 2, 0x2000, 2);
        assert_eq!(m.num_pages(), 8);
        m.set_video_mem_size(0x8000);
        assert_eq!(m.num_pages(), 2);
    }

    #[test]
    fn ega_pages_per_plane() {
        let m = GraphicsMemoryMapper::new(MemoryLayout::Ega, 640, 350, 0x40000, None, 1, 0x8000, 4);
        assert_eq!(m.num_pages(), 2);
        assert_eq!(m.segment(), 0xA000);
        assert_eq!(m.bytes_per_row(), 80);
        assert_eq!(m.planes_used(), &[0, 1, 2, 3]);

        let mut m = GraphicsMemoryMapper::new(MemoryLayout::Ega, 640, 350, 0x40000, None, 1, 0x8000, 2);
        m.set_planes_used(&[1, 3]);
        assert_eq!(m.planes_used(), &[1, 3]);
    }
}
