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

    modes::descriptor.rs

    The resolved description of an active screen mode.

*/

use crate::{
    adapter::{Adapter, Monitor},
    bytematrix::ByteMatrix,
    colours::{ColourMapper, SplitAttr},
    error::MatrixError,
    framebuffer::{GraphicsMemoryMapper, MemoryLayout, MemoryMapper, SpriteBuilder, TextMemoryMapper, TileBuilder},
    modes::catalog::{GraphicsFamily, GraphicsModeParams, TextModeParams},
};
use modular_bitfield::{bitfield, prelude::B2};

/// Screen mode info byte, kept by the BIOS at 0040:0065.
#[bitfield]
#[derive(Copy, Clone, Debug)]
pub struct ModeInfoByte {
    pub text_80: bool,
    pub graphics: bool,
    pub colorswitch: bool,
    pub always_set: bool,
    pub hires_mono: bool,
    pub blink: bool,
    #[skip]
    unused: B2,
}

/// Strategies bound to each graphics family.
struct FamilyStrategy {
    layout: MemoryLayout,
    tile_builder: fn(u32) -> TileBuilder,
    sprite_builder: fn(u32) -> SpriteBuilder,
}

fn packed_tiles(bits_per_pixel: u32) -> TileBuilder {
    TileBuilder::Packed { bits_per_pixel }
}

fn planed_tiles(bits_per_pixel: u32) -> TileBuilder {
    TileBuilder::Planed { bits_per_pixel }
}

fn packed_sprites(bits_per_pixel: u32) -> SpriteBuilder {
    SpriteBuilder::Packed { bits_per_pixel }
}

fn planed_sprites(bits_per_pixel: u32) -> SpriteBuilder {
    SpriteBuilder::Planed { bits_per_pixel }
}

static CGA_STRATEGY: FamilyStrategy = FamilyStrategy {
    layout: MemoryLayout::Cga,
    tile_builder: packed_tiles,
    sprite_builder: packed_sprites,
};

static EGA_STRATEGY: FamilyStrategy = FamilyStrategy {
    layout: MemoryLayout::Ega,
    tile_builder: planed_tiles,
    sprite_builder: planed_sprites,
};

// Tiles are packed but GET/PUT arrays store the two planes separately.
static TANDY6_STRATEGY: FamilyStrategy = FamilyStrategy {
    layout: MemoryLayout::Tandy6,
    tile_builder: packed_tiles,
    sprite_builder: planed_sprites,
};

impl GraphicsFamily {
    fn strategy(&self) -> &'static FamilyStrategy {
        match self {
            GraphicsFamily::Cga => &CGA_STRATEGY,
            GraphicsFamily::Ega { .. } => &EGA_STRATEGY,
            GraphicsFamily::Tandy6 => &TANDY6_STRATEGY,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ModeLayout {
    Text {
        mono: bool,
    },
    Graphics {
        family: GraphicsFamily,
        bits_per_pixel: u32,
        cursor_index: Option<u8>,
        tile_builder: TileBuilder,
        sprite_builder: SpriteBuilder,
    },
}

/// A resolved screen mode. Two descriptors are equal if their names are equal.
#[derive(Clone, Debug)]
pub struct ModeDescriptor {
    name: &'static str,
    rows: u32,
    columns: u32,
    font_height: u32,
    font_width: u32,
    pixel_height: u32,
    pixel_width: u32,
    attr: u8,
    layout: ModeLayout,
    colourmap: ColourMapper,
    memorymap: MemoryMapper,
}

impl ModeDescriptor {
    pub(crate) fn text(
        name: &'static str,
        params: &TextModeParams,
        adapter: Adapter,
        monitor: Monitor,
        video_mem_size: usize,
        low_intensity: bool,
    ) -> Self {
        ModeDescriptor {
            name,
            rows: params.rows,
            columns: params.columns,
            font_height: params.font_height,
            font_width: params.font_width,
            pixel_height: params.rows * params.font_height,
            pixel_width: params.columns * params.font_width,
            attr: params.attr,
            layout: ModeLayout::Text { mono: params.mono },
            colourmap: ColourMapper::new(params.colourmap, adapter, monitor, low_intensity),
            memorymap: MemoryMapper::Text(TextMemoryMapper::new(
                params.rows,
                params.columns,
                video_mem_size,
                params.max_pages,
                params.mono,
            )),
        }
    }

    pub(crate) fn graphics(
        name: &'static str,
        params: &GraphicsModeParams,
        adapter: Adapter,
        monitor: Monitor,
        video_mem_size: usize,
        low_intensity: bool,
    ) -> Self {
        let strategy = params.family.strategy();
        let mut memorymap = GraphicsMemoryMapper::new(
            strategy.layout,
            params.width,
            params.height,
            video_mem_size,
            params.max_pages,
            params.interleave_times,
            params.bank_size,
            params.bits_per_pixel,
        );
        if let GraphicsFamily::Ega { planes } = params.family {
            memorymap.set_planes_used(planes);
        }
        ModeDescriptor {
            name,
            rows: params.rows,
            columns: params.columns,
            // Hercules spreads a 14-pixel font over 348 lines, so round up
            font_height: params.height.div_ceil(params.rows),
            font_width: params.width / params.columns,
            pixel_height: params.height,
            pixel_width: params.width,
            attr: params.attr,
            layout: ModeLayout::Graphics {
                family: params.family,
                bits_per_pixel: params.bits_per_pixel,
                cursor_index: params.cursor_index,
                tile_builder: (strategy.tile_builder)(params.bits_per_pixel),
                sprite_builder: (strategy.sprite_builder)(params.bits_per_pixel),
            },
            colourmap: ColourMapper::new(params.colourmap, adapter, monitor, low_intensity),
            memorymap: MemoryMapper::Graphics(memorymap),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn is_text_mode(&self) -> bool {
        matches!(self.layout, ModeLayout::Text { .. })
    }

    /// Text rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Text columns.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn font_height(&self) -> u32 {
        self.font_height
    }

    pub fn font_width(&self) -> u32 {
        self.font_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    /// Default attribute.
    pub fn attr(&self) -> u8 {
        self.attr
    }

    pub fn layout(&self) -> &ModeLayout {
        &self.layout
    }

    /// Whether this is a monochrome text mode.
    pub fn is_mono(&self) -> bool {
        matches!(self.layout, ModeLayout::Text { mono: true })
    }

    pub fn bits_per_pixel(&self) -> Option<u32> {
        match self.layout {
            ModeLayout::Graphics { bits_per_pixel, .. } => Some(bits_per_pixel),
            ModeLayout::Text { .. } => None,
        }
    }

    /// Attribute used to draw the graphics cursor, on adapters that have one.
    pub fn cursor_index(&self) -> Option<u8> {
        match self.layout {
            ModeLayout::Graphics { cursor_index, .. } => cursor_index,
            ModeLayout::Text { .. } => None,
        }
    }

    pub fn tile_builder(&self) -> Option<TileBuilder> {
        match self.layout {
            ModeLayout::Graphics { tile_builder, .. } => Some(tile_builder),
            ModeLayout::Text { .. } => None,
        }
    }

    pub fn sprite_builder(&self) -> Option<SpriteBuilder> {
        match self.layout {
            ModeLayout::Graphics { sprite_builder, .. } => Some(sprite_builder),
            ModeLayout::Text { .. } => None,
        }
    }

    /// Build a PAINT tile from a pattern. None in text modes.
    pub fn build_tile(&self, pattern: &[u8]) -> Option<Result<ByteMatrix, MatrixError>> {
        self.tile_builder().map(|tb| tb.build(pattern))
    }

    pub fn colourmap(&self) -> &ColourMapper {
        &self.colourmap
    }

    pub fn colourmap_mut(&mut self) -> &mut ColourMapper {
        &mut self.colourmap
    }

    pub fn memorymap(&self) -> &MemoryMapper {
        &self.memorymap
    }

    pub fn num_pages(&self) -> usize {
        self.memorymap.num_pages()
    }

    pub fn set_video_mem_size(&mut self, video_mem_size: usize) {
        self.memorymap.set_video_mem_size(video_mem_size);
    }

    pub fn split_attr(&self, attr: u8) -> SplitAttr {
        self.colourmap.split_attr(attr)
    }

    /// Convert a pixel position to a 1-based (row, column) text position.
    pub fn pixel_to_text_pos(&self, x: i32, y: i32) -> (i32, i32) {
        (
            1 + y.div_euclid(self.font_height as i32),
            1 + x.div_euclid(self.font_width as i32),
        )
    }

    /// Convert a pixel area to a text area (row0, col0, row1, col1), clipped to the screen.
    pub fn pixel_to_text_area(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> (i32, i32, i32, i32) {
        let (row0, col0) = self.pixel_to_text_pos(x0, y0);
        let (row1, col1) = self.pixel_to_text_pos(x1, y1);
        let clamp_row = |r: i32| r.clamp(1, self.rows as i32);
        let clamp_col = |c: i32| c.clamp(1, self.columns as i32);
        (clamp_row(row0), clamp_col(col0), clamp_row(row1), clamp_col(col1))
    }

    /// Convert a 1-based text position to the pixel position (x, y) of the cell's top left.
    pub fn text_to_pixel_pos(&self, row: i32, col: i32) -> (i32, i32) {
        ((col - 1) * self.font_width as i32, (row - 1) * self.font_height as i32)
    }

    /// Convert a text area to a pixel area (x0, y0, x1, y1). Bounds are inclusive on both
    /// ends, so a single cell spans exactly one font cell.
    pub fn text_to_pixel_area(&self, row0: i32, col0: i32, row1: i32, col1: i32) -> (i32, i32, i32, i32) {
        let (x0, y0) = self.text_to_pixel_pos(row0, col0);
        (
            x0,
            y0,
            col1 * self.font_width as i32 - 1,
            row1 * self.font_height as i32 - 1,
        )
    }

    /// The screen mode info byte at 0040:0065.
    pub fn mode_info_byte(&self, colorswitch: bool) -> u8 {
        let info = ModeInfoByte::new()
            .with_text_80(self.is_text_mode() && self.columns == 80)
            .with_graphics(!self.is_text_mode())
            .with_colorswitch(colorswitch)
            .with_always_set(true)
            .with_hires_mono(self.name == "640x200x2")
            // Blink/intensity switching through the mode control register is not emulated
            .with_blink(true);
        info.into_bytes()[0]
    }

    /// The colour info byte at 0040:0066: the CGA palette register in SCREEN 1, the
    /// border attribute in text modes.
    pub fn colour_info_byte(&self, border_attr: u8) -> Option<u8> {
        if self.name == "320x200x4" {
            let background = self.colourmap.palette_entry(0).unwrap_or(0);
            Some(background.wrapping_add(32 * self.colourmap.cga4_palette()))
        }
        else if self.is_text_mode() {
            Some(border_attr)
        }
        else {
            None
        }
    }
}

impl PartialEq for ModeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ModeDescriptor {}

impl PartialEq<str> for ModeDescriptor {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for ModeDescriptor {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::catalog::{GRAPHICS_MODES, TEXT_MODES};

    fn text_mode(name: &'static str) -> ModeDescriptor {
        ModeDescriptor::text(name, &TEXT_MODES[name], Adapter::Cga, Monitor::Rgb, 0x4000, false)
    }

    fn graphics_mode(name: &'static str, adapter: Adapter) -> ModeDescriptor {
        ModeDescriptor::graphics(name, &GRAPHICS_MODES[name], adapter, Monitor::Rgb, 0x40000, false)
    }

    #[test]
    fn text_round_trip_8x8() {
        let mode = text_mode("cgatext80");
        assert_eq!((mode.font_width(), mode.font_height()), (8, 8));
        for row in 1..=25 {
            for col in 1..=80 {
                let (x, y) = mode.text_to_pixel_pos(row, col);
                assert_eq!(mode.pixel_to_text_pos(x, y), (row, col));
            }
        }
    }

    #[test]
    fn text_area_is_inclusive() {
        let mode = text_mode("cgatext40");
        assert_eq!(mode.text_to_pixel_area(1, 1, 1, 1), (0, 0, 7, 7));
        assert_eq!(mode.text_to_pixel_area(2, 3, 4, 5), (16, 8, 39, 31));
        assert_eq!(mode.pixel_to_text_area(-10, -10, 10_000, 10_000), (1, 1, 25, 40));
        assert_eq!(mode.pixel_to_text_area(16, 8, 39, 31), (2, 3, 4, 5));
    }

    #[test]
    fn hercules_font_height_rounds_up() {
        let mode = graphics_mode("720x348x2", Adapter::Hercules);
        assert_eq!(mode.font_height(), 14);
        assert_eq!(mode.font_width(), 9);
        assert_eq!(mode.pixel_height(), 348);
        assert_eq!(mode.num_pages(), 2);
    }

    #[test]
    fn family_strategies() {
        let ega = graphics_mode("640x350x16", Adapter::Ega);
        assert_eq!(ega.tile_builder(), Some(TileBuilder::Planed { bits_per_pixel: 4 }));
        assert_eq!(ega.sprite_builder(), Some(SpriteBuilder::Planed { bits_per_pixel: 4 }));

        let tandy = graphics_mode("640x200x4", Adapter::Tandy);
        assert_eq!(tandy.tile_builder(), Some(TileBuilder::Packed { bits_per_pixel: 2 }));
        assert_eq!(tandy.sprite_builder(), Some(SpriteBuilder::Planed { bits_per_pixel: 2 }));
        assert_eq!(tandy.cursor_index(), Some(3));

        let mono = graphics_mode("640x350x4", Adapter::EgaMono);
        match mono.memorymap() {
            MemoryMapper::Graphics(m) => assert_eq!(m.planes_used(), &[1, 3]),
            MemoryMapper::Text(_) => panic!("expected a graphics memory map"),
        }

        let text = text_mode("cgatext80");
        assert!(text.build_tile(&[0xFF]).is_none());
        assert!(text.bits_per_pixel().is_none());
    }

    #[test]
    fn equality_by_name() {
        let a = text_mode("cgatext80");
        let b = ModeDescriptor::text("cgatext80", &TEXT_MODES["cgatext80"], Adapter::PcJr, Monitor::Green, 0x100, false);
        assert_eq!(a, b);
        assert!(a == "cgatext80");
        assert!(a != text_mode("cgatext40"));
    }

    #[test]
    fn info_bytes() {
        let text = text_mode("cgatext80");
        assert_eq!(text.mode_info_byte(true), 0b10_1101);
        assert_eq!(text.colour_info_byte(4), Some(4));

        let hires = graphics_mode("640x200x2", Adapter::Cga);
        assert_eq!(hires.mode_info_byte(false), 0b11_1010);
        assert_eq!(hires.colour_info_byte(0), None);

        let mut screen1 = graphics_mode("320x200x4", Adapter::Cga);
        assert_eq!(screen1.colour_info_byte(0), Some(32));
        screen1.colourmap_mut().set_cga4_palette(0);
        assert_eq!(screen1.colour_info_byte(0), Some(0));
    }
}
