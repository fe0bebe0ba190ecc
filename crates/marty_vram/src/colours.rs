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

    colours.rs

    Colour mappers. A colour mapper turns attribute values into RGB colours
    through a palette, for one video mode on one adapter and monitor.

*/

use crate::{
    adapter::{Adapter, Monitor},
    error::ModeError,
    tablegen::{COLOURS16, COLOURS64},
};

pub type Rgb = (u8, u8, u8);

// 2-colour CGA (SCREEN 2)
pub const CGA2_PALETTE: [u8; 2] = [0, 15];
pub const CGA16_PALETTE: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
// Same colours as CGA16, picked from the 64-colour set.
pub const EGA_PALETTE: [u8; 16] = [0, 1, 2, 3, 4, 5, 20, 7, 56, 57, 58, 59, 60, 61, 62, 63];

pub const CGA4_LO_PALETTE_0: [u8; 4] = [0, 2, 4, 6];
pub const CGA4_LO_PALETTE_1: [u8; 4] = [0, 3, 5, 7];
pub const CGA4_LO_PALETTE_RED: [u8; 4] = [0, 3, 4, 7];
pub const CGA4_HI_PALETTE_0: [u8; 4] = [0, 10, 12, 14];
pub const CGA4_HI_PALETTE_1: [u8; 4] = [0, 11, 13, 15];
pub const CGA4_HI_PALETTE_RED: [u8; 4] = [0, 11, 12, 15];
// Low intensity colours with a high intensity white.
pub const TANDY4_PALETTE_0: [u8; 4] = [0, 2, 4, 6];
pub const TANDY4_PALETTE_1: [u8; 4] = [0, 3, 5, 15];

// Off, normal, blink, high intensity
pub const EGA_MONO_PALETTE: [u8; 4] = [0, 4, 1, 8];
const MONO_TEXT_PALETTE: [u8; 16] = [0; 16];
const HERCULES_PALETTE: [u8; 2] = [0, 1];

// Black, dark green, green, bright green
pub const INTENSITY_MDA_MONO: [u8; 4] = [0x00, 0x40, 0xc0, 0xff];
pub const INTENSITY_EGA_MONO: [u8; 3] = [0x00, 0xaa, 0xff];

const MDA_COLOURS: [Rgb; 4] = [(0x00, 0x00, 0x00), (0x40, 0x40, 0x40), (0xc0, 0xc0, 0xc0), (0xff, 0xff, 0xff)];
const EGA_MONO_COLOURS: [Rgb; 3] = [(0x00, 0x00, 0x00), (0xaa, 0xaa, 0xaa), (0xff, 0xff, 0xff)];
const HERCULES_COLOURS: [Rgb; 2] = [(0, 0, 0), (255, 255, 255)];

/// EGA monochrome pseudocolours as (fore, back) intensity indices. Blinking goes from
/// fore to back.
const EGA_MONO_PSEUDOCOLOURS: [(usize, usize); 9] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
];

/// Tint applied on monochrome adapters when the monitor doesn't specify one.
const DEFAULT_MONO_TINT: Rgb = (0, 255, 0);

/// Apparent intensity weights of the red, green and blue channels on a monochrome
/// monitor. Matches monitors showing increasing brightness over the 16 CGA shades.
const RGB_INTENSITY: (f64, f64, f64) = (0.5, 0.3, 0.2);

/// Convert an RGB colour to a tinted monochrome shade.
pub fn adjust_tint(rgb: Rgb, tint: Rgb, mono: bool) -> Rgb {
    if !mono {
        return rgb;
    }
    let intensity =
        rgb.0 as f64 * RGB_INTENSITY.0 + rgb.1 as f64 * RGB_INTENSITY.1 + rgb.2 as f64 * RGB_INTENSITY.2;
    let shade = |t: u8| ((t as f64 * intensity) as u32 / 255) as u8;
    (shade(tint.0), shade(tint.1), shade(tint.2))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColourMapperKind {
    Cga2,
    Cga4,
    Cga16,
    Ega16,
    Ega64,
    Ega16Text,
    Ega64Text,
    MonoText,
    EgaMono,
    Hercules,
}

impl ColourMapperKind {
    /// Text mappers interpret all 256 attribute bytes as fore/back/blink/underline.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            ColourMapperKind::Ega16Text | ColourMapperKind::Ega64Text | ColourMapperKind::MonoText
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PalettePolicy {
    Error,
    Deny,
    Allow,
}

/// An attribute split into its constituent parts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitAttr {
    pub fore: u8,
    pub back: u8,
    pub blink: bool,
    pub underline: bool,
}

/// The colours an attribute resolves to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AttrColours {
    pub fore: Rgb,
    pub back: Rgb,
    pub blink: bool,
    pub underline: bool,
}

#[derive(Clone, Debug)]
pub struct ColourMapper {
    kind: ColourMapperKind,
    adapter: Adapter,
    palette: Vec<u8>,
    mono: bool,
    mono_tint: Rgb,
    force_mono: bool,
    force_colour: bool,
    has_colorburst: bool,
    // Tandy and PCjr use their own 4-colour palettes and have no mode 5.
    tandy: bool,
    has_mode_5: bool,
    low_intensity: bool,
    palette_number: u8,
    mode_5: bool,
    policy: PalettePolicy,
}

impl ColourMapper {
    /// `low_intensity` selects the low intensity CGA 4-colour palettes.
    pub fn new(kind: ColourMapperKind, adapter: Adapter, monitor: Monitor, low_intensity: bool) -> Self {
        let tint = monitor.mono_tint();
        let mut mapper = ColourMapper {
            kind,
            adapter,
            palette: Vec::new(),
            mono: tint.is_some() || kind == ColourMapperKind::Hercules,
            mono_tint: tint.unwrap_or(DEFAULT_MONO_TINT),
            force_mono: monitor.is_mono(),
            force_colour: !monitor.is_mono() && monitor != Monitor::Composite,
            has_colorburst: adapter.has_colorburst(),
            tandy: adapter.is_tandy_family(),
            has_mode_5: adapter.has_mode_5(),
            low_intensity,
            // Cyan, magenta, white
            palette_number: 1,
            mode_5: false,
            policy: PalettePolicy::Allow,
        };
        mapper.policy = match adapter {
            Adapter::Cga | Adapter::Mda | Adapter::Hercules | Adapter::Olivetti => PalettePolicy::Error,
            Adapter::Tandy | Adapter::PcJr if mapper.num_attr() == 256 => PalettePolicy::Deny,
            _ => PalettePolicy::Allow,
        };
        mapper.reset_palette();
        mapper
    }

    #[inline]
    pub fn kind(&self) -> ColourMapperKind {
        self.kind
    }

    pub fn is_mono(&self) -> bool {
        self.mono
    }

    fn colours(&self) -> &'static [Rgb] {
        match self.kind {
            ColourMapperKind::Cga2
            | ColourMapperKind::Cga4
            | ColourMapperKind::Cga16
            | ColourMapperKind::Ega16
            | ColourMapperKind::Ega16Text => &COLOURS16,
            ColourMapperKind::Ega64 | ColourMapperKind::Ega64Text => &COLOURS64,
            ColourMapperKind::MonoText => &MDA_COLOURS,
            ColourMapperKind::EgaMono => &EGA_MONO_COLOURS,
            ColourMapperKind::Hercules => &HERCULES_COLOURS,
        }
    }

    pub fn default_palette(&self) -> &'static [u8] {
        match self.kind {
            ColourMapperKind::Cga2 => &CGA2_PALETTE,
            ColourMapperKind::Cga16 | ColourMapperKind::Ega16 | ColourMapperKind::Ega16Text => &CGA16_PALETTE,
            ColourMapperKind::Ega64 | ColourMapperKind::Ega64Text => &EGA_PALETTE,
            ColourMapperKind::MonoText => &MONO_TEXT_PALETTE,
            ColourMapperKind::EgaMono => &EGA_MONO_PALETTE,
            ColourMapperKind::Hercules => &HERCULES_PALETTE,
            ColourMapperKind::Cga4 => self.cga4_default_palette(),
        }
    }

    fn cga4_default_palette(&self) -> &'static [u8] {
        if self.tandy {
            if self.palette_number != 0 {
                &TANDY4_PALETTE_1
            }
            else {
                &TANDY4_PALETTE_0
            }
        }
        else if self.mode_5 && self.has_mode_5 {
            if self.low_intensity {
                &CGA4_LO_PALETTE_RED
            }
            else {
                &CGA4_HI_PALETTE_RED
            }
        }
        else if self.low_intensity {
            if self.palette_number != 0 {
                &CGA4_LO_PALETTE_1
            }
            else {
                &CGA4_LO_PALETTE_0
            }
        }
        else if self.palette_number != 0 {
            &CGA4_HI_PALETTE_1
        }
        else {
            &CGA4_HI_PALETTE_0
        }
    }

    pub fn palette(&self) -> &[u8] {
        &self.palette
    }

    pub fn palette_entry(&self, index: usize) -> Option<u8> {
        self.palette.get(index).copied()
    }

    pub fn reset_palette(&mut self) {
        self.palette = self.default_palette().to_vec();
    }

    /// Number of entries in the palette.
    pub fn num_palette(&self) -> usize {
        match self.kind {
            ColourMapperKind::MonoText => 16,
            _ => self.default_palette().len(),
        }
    }

    /// Number of values that can be assigned to a palette entry.
    pub fn num_colours(&self) -> usize {
        match self.kind {
            ColourMapperKind::EgaMono => EGA_MONO_PSEUDOCOLOURS.len(),
            _ => self.colours().len(),
        }
    }

    /// Number of distinct attributes.
    pub fn num_attr(&self) -> usize {
        if self.kind.is_text() {
            256
        }
        else {
            self.default_palette().len()
        }
    }

    /// Check if the mode allows palette changes. On some adapters an attempt to
    /// change the palette is an error.
    pub fn allows_palette_change(&self) -> Result<bool, ModeError> {
        match self.policy {
            PalettePolicy::Error => Err(ModeError::PaletteChange(self.adapter)),
            PalettePolicy::Deny => Ok(false),
            PalettePolicy::Allow => Ok(true),
        }
    }

    /// Replace the whole palette. Ignored if the adapter denies palette changes,
    /// unless `force` is set.
    pub fn set_palette(&mut self, new_palette: &[u8], force: bool) -> Result<(), ModeError> {
        if force || self.allows_palette_change()? {
            self.palette = new_palette.to_vec();
        }
        Ok(())
    }

    pub fn set_palette_entry(&mut self, index: usize, colour: u8, force: bool) -> Result<(), ModeError> {
        if force || self.allows_palette_change()? {
            match self.palette.get_mut(index) {
                Some(entry) => *entry = colour,
                None => log::warn!("Palette index {} out of range for {:?} palette", index, self.kind),
            }
        }
        Ok(())
    }

    /// Split an attribute byte into its constituent parts.
    pub fn split_attr(&self, attr: u8) -> SplitAttr {
        match self.kind {
            // 7  6 5 4  3 2 1 0
            // Bl b b b  f f f f
            ColourMapperKind::Ega16Text | ColourMapperKind::Ega64Text => SplitAttr {
                fore: attr & 0x0f,
                back: (attr >> 4) & 0x07,
                blink: attr & 0x80 != 0,
                underline: false,
            },
            ColourMapperKind::MonoText => split_mono_attr(attr),
            _ => SplitAttr {
                fore: attr & 0x0f,
                ..Default::default()
            },
        }
    }

    /// Join constituent parts into an attribute byte.
    pub fn join_attr(&self, fore: u8, back: u8, blink: bool, _underline: bool) -> u8 {
        match self.kind {
            ColourMapperKind::Ega16Text | ColourMapperKind::Ega64Text => {
                ((blink as u8) << 7) | ((back & 0x07) << 4) | (fore & 0x0f)
            }
            _ => fore & 0x0f,
        }
    }

    fn palette_rgb(&self, index: u8) -> Option<Rgb> {
        let colour = *self.palette.get(index as usize)?;
        let rgb = *self.colours().get(colour as usize)?;
        Some(adjust_tint(rgb, self.mono_tint, self.mono))
    }

    fn intensity_rgb(&self, index: usize) -> Option<Rgb> {
        let rgb = *self.colours().get(index)?;
        Some(adjust_tint(rgb, self.mono_tint, self.mono))
    }

    /// Resolve an attribute to its colours through the current palette. Returns None if
    /// the attribute or its palette entry is out of range.
    pub fn attr_to_rgb(&self, attr: u8) -> Option<AttrColours> {
        match self.kind {
            ColourMapperKind::Ega16Text | ColourMapperKind::Ega64Text => {
                let split = self.split_attr(attr);
                Some(AttrColours {
                    fore: self.palette_rgb(split.fore)?,
                    back: self.palette_rgb(split.back)?,
                    blink: split.blink,
                    underline: split.underline,
                })
            }
            ColourMapperKind::MonoText => {
                // The palette is ignored
                let split = split_mono_attr(attr);
                Some(AttrColours {
                    fore: self.intensity_rgb(split.fore as usize)?,
                    back: self.intensity_rgb(split.back as usize)?,
                    blink: split.blink,
                    underline: split.underline,
                })
            }
            ColourMapperKind::EgaMono => {
                let colour = *self.palette.get(attr as usize)? as usize;
                let (fore, back) = EGA_MONO_PSEUDOCOLOURS[colour % EGA_MONO_PSEUDOCOLOURS.len()];
                Some(AttrColours {
                    fore: self.intensity_rgb(fore)?,
                    back: self.intensity_rgb(back)?,
                    blink: fore != back,
                    underline: false,
                })
            }
            _ => {
                let rgb = self.palette_rgb(attr)?;
                Some(AttrColours {
                    fore: rgb,
                    back: rgb,
                    blink: false,
                    underline: false,
                })
            }
        }
    }

    /// Colours for every attribute, as submitted to the display backend on a
    /// palette change.
    pub fn rgb_table(&self) -> Vec<AttrColours> {
        (0..self.num_attr())
            .map(|attr| self.attr_to_rgb(attr as u8).unwrap_or_default())
            .collect()
    }

    /// CGA palette number, readable from low memory.
    pub fn cga4_palette(&self) -> u8 {
        match self.kind {
            ColourMapperKind::Cga4 => self.palette_number,
            _ => 1,
        }
    }

    /// Select the default 4-colour CGA palette. Takes effect on the next palette reset.
    pub fn set_cga4_palette(&mut self, num: u8) {
        if self.kind == ColourMapperKind::Cga4 {
            self.palette_number = num % 2;
        }
    }

    pub fn set_low_intensity(&mut self, low_intensity: bool) {
        self.low_intensity = low_intensity;
    }

    /// The CGA RGB "mode 5" flag: SCREEN 1 with the colour burst disabled shows the
    /// red-cyan-white palette.
    pub fn mode_5(&self) -> bool {
        self.mode_5
    }

    /// Apply the SCREEN colorswitch parameter.
    pub fn set_colorswitch(&mut self, colorswitch: bool) {
        match self.kind {
            _ if self.kind.is_text() => self.set_colorburst(colorswitch),
            // Works the other way around in SCREEN 1
            ColourMapperKind::Cga4 => self.set_colorburst(!colorswitch),
            // SCREEN 2 ignores the parameter and turns the colour burst off
            ColourMapperKind::Cga2 => self.set_colorburst(false),
            _ => {}
        }
    }

    /// Set the NTSC colour burst bit of the mode control register.
    ///
    /// On an RGB monitor this switches SCREEN 1 between the mode 4 and mode 5 palettes.
    /// On a composite monitor it switches between colour and greyscale.
    pub fn set_colorburst(&mut self, colour_on: bool) {
        if !self.has_colorburst {
            return;
        }
        match self.kind {
            ColourMapperKind::Cga4 => {
                if self.force_colour {
                    self.mode_5 = !colour_on;
                    self.set_cga4_palette(1);
                }
                else {
                    self.mono = self.force_mono || !colour_on;
                }
            }
            ColourMapperKind::Cga16 => {
                self.mono = self.force_mono || (!colour_on && !self.force_colour);
            }
            _ => {}
        }
        log::trace!(
            "Colour burst {} on {:?}: mono={} mode_5={}",
            colour_on,
            self.kind,
            self.mono,
            self.mode_5
        );
    }
}

/// MDA text attributes behave mostly like a bitmap: bit 0..2 == 1 underlines, bit 3 is
/// high intensity, bit 7 blinks. Eight attributes are exceptions: 00h, 08h, 80h and 88h
/// are black space, 70h and F0h are black on green, 78h and F8h are dark green on green.
fn split_mono_attr(attr: u8) -> SplitAttr {
    let (fore, back) = match attr {
        0x00 | 0x08 | 0x80 | 0x88 => (0, 0),
        0x70 | 0xf0 => (0, 2),
        0x78 | 0xf8 => (1, 3),
        _ if attr & 0x08 != 0 => (3, 0),
        _ => (2, 0),
    };
    SplitAttr {
        fore,
        back,
        blink: attr & 0x80 != 0,
        underline: attr % 8 == 1,
    }
}
