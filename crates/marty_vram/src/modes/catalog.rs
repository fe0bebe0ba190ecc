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

    modes::catalog.rs

    Static screen mode tables: which SCREEN numbers each adapter supports,
    where WIDTH takes each mode, and the parameters of every text and
    graphics mode.

*/

use crate::{adapter::Adapter, colours::ColourMapperKind, VramHashMap};
use lazy_static::lazy_static;
use strum::IntoEnumIterator;

/// Key into an adapter's mode table: SCREEN 0 is keyed by its column count, the
/// graphics screens by number.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum ModeKey {
    Text(u32),
    Graphics(u8),
}

/// A reference to the current mode when looking up a width switch. Graphics modes
/// may be referred to by SCREEN number or by mode name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModeRef<'a> {
    Number(u8),
    Name(&'a str),
}

impl From<u8> for ModeRef<'_> {
    fn from(number: u8) -> Self {
        ModeRef::Number(number)
    }
}

impl<'a> From<&'a str> for ModeRef<'a> {
    fn from(name: &'a str) -> Self {
        ModeRef::Name(name)
    }
}

/// Hardware family of a graphics mode. Selects the memory layout and the tile and
/// sprite builders.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphicsFamily {
    Cga,
    /// Planar EGA/VGA layout using the given bit planes.
    Ega { planes: &'static [u8] },
    Tandy6,
}

pub const ALL_PLANES: &[u8] = &[0, 1, 2, 3];
pub const EGA_MONO_PLANES: &[u8] = &[1, 3];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GraphicsModeParams {
    pub width: u32,
    pub height: u32,
    pub rows: u32,
    pub columns: u32,
    pub attr: u8,
    pub bits_per_pixel: u32,
    pub interleave_times: usize,
    pub bank_size: usize,
    pub max_pages: Option<usize>,
    pub cursor_index: Option<u8>,
    pub family: GraphicsFamily,
    pub colourmap: ColourMapperKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextModeParams {
    pub rows: u32,
    pub columns: u32,
    pub font_height: u32,
    pub font_width: u32,
    pub attr: u8,
    pub max_pages: usize,
    pub mono: bool,
    pub colourmap: ColourMapperKind,
}

/// Target SCREEN number by requested column count.
pub type WidthSwitches = VramHashMap<u32, u8>;

/// Mode and width switch tables for one adapter.
#[derive(Debug, Default)]
pub struct AdapterCatalog {
    modes: VramHashMap<ModeKey, &'static str>,
    width_by_number: VramHashMap<u8, WidthSwitches>,
    width_by_name: VramHashMap<&'static str, WidthSwitches>,
}

impl AdapterCatalog {
    fn new(adapter: Adapter) -> Self {
        let modes: VramHashMap<ModeKey, &'static str> = mode_table(adapter).into_iter().collect();

        let mut width_by_number = VramHashMap::default();
        let mut width_by_name = VramHashMap::default();
        for &(number, switches) in width_table(adapter) {
            let switches: WidthSwitches = switches.iter().copied().collect();
            // Graphics modes can also be looked up by name
            if number != 0 {
                if let Some(name) = modes.get(&ModeKey::Graphics(number)) {
                    width_by_name.insert(*name, switches.clone());
                }
            }
            width_by_number.insert(number, switches);
        }
        log::trace!(
            "Built {} mode catalog: {} modes, {} width switches",
            adapter,
            modes.len(),
            width_by_number.len()
        );
        AdapterCatalog {
            modes,
            width_by_number,
            width_by_name,
        }
    }

    pub fn mode_name(&self, key: ModeKey) -> Option<&'static str> {
        self.modes.get(&key).copied()
    }

    pub fn width_switches(&self, mode: ModeRef<'_>) -> Option<&WidthSwitches> {
        match mode {
            ModeRef::Number(number) => self.width_by_number.get(&number),
            ModeRef::Name(name) => self.width_by_name.get(name),
        }
    }

    /// All SCREEN numbers defined, including 0 for text.
    pub fn screen_numbers(&self) -> Vec<u8> {
        let mut numbers: Vec<u8> = self
            .modes
            .keys()
            .map(|key| match key {
                ModeKey::Text(_) => 0,
                ModeKey::Graphics(n) => *n,
            })
            .collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }
}

fn mode_table(adapter: Adapter) -> Vec<(ModeKey, &'static str)> {
    use ModeKey::{Graphics as G, Text as T};
    match adapter {
        Adapter::Cga => vec![(T(40), "cgatext40"), (T(80), "cgatext80"), (G(1), "320x200x4"), (G(2), "640x200x2")],
        Adapter::Ega | Adapter::Vga => {
            let text = if adapter == Adapter::Vga {
                [(T(40), "vgatext40"), (T(80), "vgatext80")]
            }
            else {
                [(T(40), "egatext40"), (T(80), "egatext80")]
            };
            let mut table = text.to_vec();
            table.extend([
                (G(1), "320x200x4"),
                (G(2), "640x200x2"),
                (G(7), "320x200x16"),
                (G(8), "640x200x16"),
                (G(9), "640x350x16"),
            ]);
            table
        }
        Adapter::Mda => vec![(T(40), "mdatext40"), (T(80), "mdatext80")],
        Adapter::EgaMono => vec![(T(40), "ega_monotext40"), (T(80), "ega_monotext80"), (G(10), "640x350x4")],
        Adapter::Hercules => vec![(T(40), "mdatext40"), (T(80), "mdatext80"), (G(3), "720x348x2")],
        Adapter::Tandy | Adapter::PcJr => {
            let text = if adapter == Adapter::Tandy {
                [(T(40), "tandytext40"), (T(80), "tandytext80")]
            }
            else {
                [(T(40), "cgatext40"), (T(80), "cgatext80")]
            };
            let mut table = text.to_vec();
            table.extend([
                (G(1), "320x200x4_8pg"),
                (G(2), "640x200x2_8pg"),
                (G(3), "160x200x16"),
                (G(4), "320x200x4pcjr"),
                (G(5), "320x200x16pcjr"),
                (G(6), "640x200x4"),
            ]);
            table
        }
        Adapter::Olivetti => {
            let mut table = vec![
                (T(40), "olivettitext40"),
                (T(80), "olivettitext80"),
                (G(1), "320x200x4"),
                (G(2), "640x200x2"),
                (G(3), "640x400x2"),
            ];
            // On the Olivetti M24 every number from 3 up selects the 640x400 mode
            table.extend((4..=255).map(|n| (G(n), "640x400x2")));
            table
        }
    }
}

type WidthTable = &'static [(u8, &'static [(u32, u8)])];

const CGA_WIDTHS: WidthTable = &[
    (0, &[(40, 0), (80, 0)]),
    (1, &[(40, 1), (80, 2)]),
    (2, &[(40, 1), (80, 2)]),
];

const EGA_WIDTHS: WidthTable = &[
    (0, &[(40, 0), (80, 0)]),
    (1, &[(40, 1), (80, 2)]),
    (2, &[(40, 1), (80, 2)]),
    (7, &[(40, 7), (80, 8)]),
    (8, &[(40, 7), (80, 8)]),
    (9, &[(40, 1), (80, 9)]),
];

const MDA_WIDTHS: WidthTable = &[(0, &[(40, 0), (80, 0)])];

const EGA_MONO_WIDTHS: WidthTable = &[(0, &[(40, 0), (80, 0)]), (10, &[(40, 0), (80, 10)])];

const HERCULES_WIDTHS: WidthTable = &[(0, &[(40, 0), (80, 0)]), (3, &[(40, 0), (80, 3)])];

const PCJR_WIDTHS: WidthTable = &[
    (0, &[(20, 3), (40, 0), (80, 0)]),
    (1, &[(20, 3), (40, 1), (80, 2)]),
    (2, &[(20, 3), (40, 1), (80, 2)]),
    (3, &[(20, 3), (40, 1), (80, 2)]),
    (4, &[(20, 3), (40, 4), (80, 2)]),
    (5, &[(20, 3), (40, 5), (80, 6)]),
    (6, &[(20, 3), (40, 5), (80, 6)]),
];

const OLIVETTI_WIDTHS: WidthTable = &[
    (0, &[(40, 0), (80, 0)]),
    (1, &[(40, 1), (80, 2)]),
    (2, &[(40, 1), (80, 2)]),
    // Unverified on hardware
    (3, &[(40, 1), (80, 3)]),
];

fn width_table(adapter: Adapter) -> WidthTable {
    match adapter {
        Adapter::Cga => CGA_WIDTHS,
        Adapter::Ega | Adapter::Vga => EGA_WIDTHS,
        Adapter::Mda => MDA_WIDTHS,
        Adapter::EgaMono => EGA_MONO_WIDTHS,
        Adapter::Hercules => HERCULES_WIDTHS,
        Adapter::Tandy | Adapter::PcJr => PCJR_WIDTHS,
        Adapter::Olivetti => OLIVETTI_WIDTHS,
    }
}

const fn text_params(columns: u32, font_height: u32, font_width: u32, mono: bool, colourmap: ColourMapperKind) -> TextModeParams {
    TextModeParams {
        rows: 25,
        columns,
        font_height,
        font_width,
        attr: 7,
        max_pages: if columns == 40 { 8 } else { 4 },
        mono,
        colourmap,
    }
}

const CGA_320X200X4: GraphicsModeParams = GraphicsModeParams {
    width: 320,
    height: 200,
    rows: 25,
    columns: 40,
    attr: 3,
    bits_per_pixel: 2,
    interleave_times: 2,
    bank_size: 0x2000,
    max_pages: Some(1),
    cursor_index: None,
    family: GraphicsFamily::Cga,
    colourmap: ColourMapperKind::Cga4,
};

const CGA_640X200X2: GraphicsModeParams = GraphicsModeParams {
    width: 640,
    height: 200,
    rows: 25,
    columns: 80,
    attr: 1,
    bits_per_pixel: 1,
    interleave_times: 2,
    bank_size: 0x2000,
    max_pages: Some(1),
    cursor_index: None,
    family: GraphicsFamily::Cga,
    colourmap: ColourMapperKind::Cga2,
};

lazy_static! {
    /// Graphics mode parameters by mode name.
    pub static ref GRAPHICS_MODES: VramHashMap<&'static str, GraphicsModeParams> = {
        let mut map = VramHashMap::default();
        // 04h, SCREEN 1
        map.insert("320x200x4", CGA_320X200X4);
        // 06h, SCREEN 2
        map.insert("640x200x2", CGA_640X200X2);
        // 08h, Tandy/PCjr SCREEN 3
        map.insert(
            "160x200x16",
            GraphicsModeParams {
                width: 160,
                height: 200,
                rows: 25,
                columns: 20,
                attr: 15,
                bits_per_pixel: 4,
                interleave_times: 2,
                bank_size: 0x2000,
                max_pages: Some(8),
                cursor_index: Some(3),
                family: GraphicsFamily::Cga,
                colourmap: ColourMapperKind::Cga16,
            },
        );
        // Tandy/PCjr SCREEN 4
        map.insert(
            "320x200x4pcjr",
            GraphicsModeParams {
                max_pages: Some(8),
                cursor_index: Some(3),
                ..CGA_320X200X4
            },
        );
        // 09h, Tandy/PCjr SCREEN 5
        map.insert(
            "320x200x16pcjr",
            GraphicsModeParams {
                width: 320,
                height: 200,
                rows: 25,
                columns: 40,
                attr: 15,
                bits_per_pixel: 4,
                interleave_times: 4,
                bank_size: 0x2000,
                max_pages: Some(4),
                cursor_index: Some(3),
                family: GraphicsFamily::Cga,
                colourmap: ColourMapperKind::Cga16,
            },
        );
        // 0Ah, Tandy/PCjr SCREEN 6
        map.insert(
            "640x200x4",
            GraphicsModeParams {
                width: 640,
                height: 200,
                rows: 25,
                columns: 80,
                attr: 3,
                bits_per_pixel: 2,
                interleave_times: 4,
                bank_size: 0x2000,
                max_pages: Some(4),
                cursor_index: Some(3),
                family: GraphicsFamily::Tandy6,
                colourmap: ColourMapperKind::Cga4,
            },
        );
        // 0Dh, EGA SCREEN 7
        map.insert(
            "320x200x16",
            GraphicsModeParams {
                width: 320,
                height: 200,
                rows: 25,
                columns: 40,
                attr: 15,
                bits_per_pixel: 4,
                interleave_times: 1,
                bank_size: 0x2000,
                max_pages: None,
                cursor_index: None,
                family: GraphicsFamily::Ega { planes: ALL_PLANES },
                colourmap: ColourMapperKind::Ega16,
            },
        );
        // 0Eh, EGA SCREEN 8
        map.insert(
            "640x200x16",
            GraphicsModeParams {
                width: 640,
                height: 200,
                rows: 25,
                columns: 80,
                attr: 15,
                bits_per_pixel: 4,
                interleave_times: 1,
                bank_size: 0x4000,
                max_pages: None,
                cursor_index: None,
                family: GraphicsFamily::Ega { planes: ALL_PLANES },
                colourmap: ColourMapperKind::Ega16,
            },
        );
        // 10h, EGA SCREEN 9
        map.insert(
            "640x350x16",
            GraphicsModeParams {
                width: 640,
                height: 350,
                rows: 25,
                columns: 80,
                attr: 15,
                bits_per_pixel: 4,
                interleave_times: 1,
                bank_size: 0x8000,
                max_pages: None,
                cursor_index: None,
                family: GraphicsFamily::Ega { planes: ALL_PLANES },
                colourmap: ColourMapperKind::Ega64,
            },
        );
        // 0Fh, EGA monochrome SCREEN 10
        map.insert(
            "640x350x4",
            GraphicsModeParams {
                width: 640,
                height: 350,
                rows: 25,
                columns: 80,
                attr: 1,
                bits_per_pixel: 2,
                interleave_times: 1,
                bank_size: 0x8000,
                max_pages: None,
                cursor_index: None,
                family: GraphicsFamily::Ega { planes: EGA_MONO_PLANES },
                colourmap: ColourMapperKind::EgaMono,
            },
        );
        // 40h, Olivetti SCREEN 3 and up
        map.insert(
            "640x400x2",
            GraphicsModeParams {
                width: 640,
                height: 400,
                rows: 25,
                columns: 80,
                attr: 1,
                bits_per_pixel: 1,
                interleave_times: 4,
                bank_size: 0x2000,
                max_pages: Some(1),
                cursor_index: None,
                family: GraphicsFamily::Cga,
                colourmap: ColourMapperKind::Cga2,
            },
        );
        // Hercules SCREEN 3
        map.insert(
            "720x348x2",
            GraphicsModeParams {
                width: 720,
                height: 348,
                rows: 25,
                columns: 80,
                attr: 1,
                bits_per_pixel: 1,
                interleave_times: 4,
                bank_size: 0x2000,
                max_pages: Some(2),
                cursor_index: None,
                family: GraphicsFamily::Cga,
                colourmap: ColourMapperKind::Hercules,
            },
        );
        // Tandy/PCjr 8-page versions of the CGA modes
        map.insert(
            "320x200x4_8pg",
            GraphicsModeParams {
                max_pages: Some(8),
                ..CGA_320X200X4
            },
        );
        map.insert(
            "640x200x2_8pg",
            GraphicsModeParams {
                max_pages: Some(8),
                ..CGA_640X200X2
            },
        );
        map
    };

    /// Text mode parameters by mode name.
    pub static ref TEXT_MODES: VramHashMap<&'static str, TextModeParams> = {
        use ColourMapperKind::*;
        VramHashMap::from_iter([
            ("vgatext40", text_params(40, 16, 9, false, Ega64Text)),
            ("vgatext80", text_params(80, 16, 9, false, Ega64Text)),
            ("egatext40", text_params(40, 14, 8, false, Ega64Text)),
            ("egatext80", text_params(80, 14, 8, false, Ega64Text)),
            ("ega_monotext40", text_params(40, 14, 8, true, MonoText)),
            ("ega_monotext80", text_params(80, 14, 8, true, MonoText)),
            ("mdatext40", TextModeParams { max_pages: 1, ..text_params(40, 14, 9, true, MonoText) }),
            ("mdatext80", TextModeParams { max_pages: 1, ..text_params(80, 14, 9, true, MonoText) }),
            ("tandytext40", text_params(40, 9, 8, false, Ega16Text)),
            ("tandytext80", text_params(80, 9, 8, false, Ega16Text)),
            ("cgatext40", text_params(40, 8, 8, false, Ega16Text)),
            ("cgatext80", text_params(80, 8, 8, false, Ega16Text)),
            // Olivetti text uses the plain 16-colour mapper
            ("olivettitext40", text_params(40, 16, 8, false, Ega16)),
            ("olivettitext80", text_params(80, 16, 8, false, Ega16)),
        ])
    };

    static ref CATALOGS: VramHashMap<Adapter, AdapterCatalog> =
        Adapter::iter().map(|adapter| (adapter, AdapterCatalog::new(adapter))).collect();

    /// BIOS mode numbers of graphics modes, as reported by INT 10h AH=0Fh.
    pub static ref LEGACY_MODE_NUMBERS: VramHashMap<&'static str, u8> = VramHashMap::from_iter([
        ("640x200x2", 6),
        ("160x200x16", 8),
        ("320x200x16pcjr", 9),
        ("640x200x4", 10),
        ("320x200x16", 13),
        ("640x200x16", 14),
        ("640x350x4", 15),
        ("640x350x16", 16),
        ("640x400x2", 0x40),
        ("320x200x4pcjr", 4),
        ("320x200x4", 4),
    ]);
}

/// The mode catalog of an adapter.
pub fn catalog(adapter: Adapter) -> &'static AdapterCatalog {
    lazy_static! {
        static ref EMPTY: AdapterCatalog = AdapterCatalog::default();
    }
    CATALOGS.get(&adapter).unwrap_or(&*EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalogued_mode_has_params() {
        for adapter in Adapter::iter() {
            let catalog = catalog(adapter);
            for (key, name) in catalog.modes.iter() {
                match key {
                    ModeKey::Text(_) => assert!(TEXT_MODES.contains_key(name), "{} missing", name),
                    ModeKey::Graphics(_) => assert!(GRAPHICS_MODES.contains_key(name), "{} missing", name),
                }
            }
        }
    }

    #[test]
    fn width_switches_by_name() {
        let cga = catalog(Adapter::Cga);
        assert_eq!(cga.width_switches(ModeRef::Name("640x200x2")).unwrap()[&40], 1);
        assert_eq!(cga.width_switches(2.into()).unwrap()[&40], 1);
        // text modes have no name alias
        assert!(cga.width_switches("cgatext80".into()).is_none());

        let vga = catalog(Adapter::Vga);
        assert_eq!(vga.width_switches("640x350x16".into()).unwrap()[&40], 1);

        let tandy = catalog(Adapter::Tandy);
        assert_eq!(tandy.width_switches("320x200x4_8pg".into()).unwrap()[&20], 3);
    }

    #[test]
    fn olivetti_high_numbers_alias() {
        let olivetti = catalog(Adapter::Olivetti);
        assert_eq!(olivetti.mode_name(ModeKey::Graphics(3)), Some("640x400x2"));
        assert_eq!(olivetti.mode_name(ModeKey::Graphics(255)), Some("640x400x2"));
        assert_eq!(olivetti.screen_numbers().len(), 256);
    }

    #[test]
    fn eight_page_variants_only_differ_in_pages() {
        let cga = GRAPHICS_MODES["320x200x4"];
        let pg8 = GRAPHICS_MODES["320x200x4_8pg"];
        assert_eq!(cga.max_pages, Some(1));
        assert_eq!(pg8, GraphicsModeParams { max_pages: Some(8), ..cga });
    }
}
