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

    modes::mod.rs

    Screen mode resolution. Turns a SCREEN number and text width into a mode
    descriptor for the active adapter, retargets modes on WIDTH, and reports
    the BIOS mode number of a mode.

    Resolution is stateless: callers keep the active descriptor and pass it
    back in when they need a width change.

*/

pub mod catalog;
pub mod descriptor;

pub use catalog::{ModeKey, ModeRef};
pub use descriptor::{ModeDescriptor, ModeInfoByte, ModeLayout};

use crate::{
    adapter::{Adapter, Monitor},
    error::ModeError,
};
use catalog::{catalog, GRAPHICS_MODES, LEGACY_MODE_NUMBERS, TEXT_MODES};

/// Reported for modes without a known BIOS mode number.
pub const UNKNOWN_MODE_NUMBER: u8 = 0xFF;

/// Resolve a SCREEN number to a mode descriptor. SCREEN 0 selects the text mode with
/// `width` columns; `width` is ignored for graphics modes.
pub fn get_mode(
    number: u8,
    width: u32,
    adapter: Adapter,
    monitor: Monitor,
    video_mem_size: usize,
) -> Result<ModeDescriptor, ModeError> {
    resolve_mode(number, width, adapter, monitor, video_mem_size, false)
}

/// As [get_mode], building CGA 4-colour palettes at low intensity if `low_intensity` is set.
pub fn resolve_mode(
    number: u8,
    width: u32,
    adapter: Adapter,
    monitor: Monitor,
    video_mem_size: usize,
    low_intensity: bool,
) -> Result<ModeDescriptor, ModeError> {
    let catalog = catalog(adapter);
    let mode = if number == 0 {
        let params = catalog
            .mode_name(ModeKey::Text(width))
            .and_then(|name| TEXT_MODES.get(name).map(|params| (name, params)));
        match params {
            Some((name, params)) => ModeDescriptor::text(name, params, adapter, monitor, video_mem_size, low_intensity),
            None => {
                log::warn!("resolve_mode(): {} has no {}-column text mode", adapter, width);
                return Err(ModeError::NoSuchTextWidth { adapter, columns: width });
            }
        }
    }
    else {
        let params = catalog
            .mode_name(ModeKey::Graphics(number))
            .and_then(|name| GRAPHICS_MODES.get(name).map(|params| (name, params)));
        match params {
            Some((name, params)) => ModeDescriptor::graphics(name, params, adapter, monitor, video_mem_size, low_intensity),
            None => {
                log::warn!("resolve_mode(): {} has no SCREEN {}", adapter, number);
                return Err(ModeError::NoSuchMode { adapter, number });
            }
        }
    };
    log::debug!(
        "Resolved SCREEN {}, WIDTH {} on {} to mode {} ({} pages)",
        number,
        width,
        adapter,
        mode.name(),
        mode.num_pages()
    );
    Ok(mode)
}

/// Look up the SCREEN number WIDTH `columns` takes the given mode to.
pub fn width_switch<'a>(mode: impl Into<ModeRef<'a>>, columns: u32, adapter: Adapter) -> Result<u8, ModeError> {
    let mode = mode.into();
    catalog(adapter)
        .width_switches(mode)
        .and_then(|switches| switches.get(&columns).copied())
        .ok_or_else(|| {
            let mode = match mode {
                ModeRef::Number(n) => n.to_string(),
                ModeRef::Name(name) => name.to_string(),
            };
            log::warn!("width_switch(): {} cannot switch mode {} to {} columns", adapter, mode, columns);
            ModeError::NoWidthSwitch { adapter, mode, columns }
        })
}

/// Decide which SCREEN a WIDTH statement moves to from the `current` mode. Returns None
/// if the width is unchanged.
pub fn resolve_width_change(current: &ModeDescriptor, to_width: u32, adapter: Adapter) -> Result<Option<u8>, ModeError> {
    if current.columns() == to_width {
        return Ok(None);
    }
    if current.is_text_mode() && (to_width == 40 || to_width == 80) {
        return Ok(Some(0));
    }
    width_switch(current.name(), to_width, adapter).map(Some)
}

/// The BIOS mode number of a mode, as returned by INT 10h AH=0Fh.
pub fn mode_number(mode: &ModeDescriptor, colorswitch: bool) -> u8 {
    if mode.is_text_mode() {
        if matches!(mode.name(), "mdatext80" | "ega_monotext80") {
            return 7;
        }
        return (mode.columns() == 40) as u8 * 2 + colorswitch as u8;
    }
    if mode.name() == "320x200x4" {
        return 4 + mode.colourmap().mode_5() as u8;
    }
    LEGACY_MODE_NUMBERS
        .get(mode.name())
        .copied()
        .unwrap_or(UNKNOWN_MODE_NUMBER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const MEM: usize = 0x40000;

    fn mode(number: u8, width: u32, adapter: Adapter) -> ModeDescriptor {
        get_mode(number, width, adapter, Monitor::Rgb, MEM).unwrap()
    }

    #[test]
    fn resolves_by_number_and_width() {
        assert_eq!(mode(0, 80, Adapter::Cga).name(), "cgatext80");
        assert_eq!(mode(1, 40, Adapter::Cga).name(), "320x200x4");
        assert_eq!(mode(1, 80, Adapter::Cga).name(), "320x200x4");
        assert_eq!(mode(9, 80, Adapter::Ega).name(), "640x350x16");
        assert_eq!(mode(0, 40, Adapter::Vga).name(), "vgatext40");
        assert_eq!(mode(0, 80, Adapter::Hercules).name(), "mdatext80");
        assert_eq!(mode(3, 80, Adapter::Hercules).name(), "720x348x2");
        assert_eq!(mode(0, 80, Adapter::PcJr).name(), "cgatext80");
        assert_eq!(mode(1, 40, Adapter::Tandy).name(), "320x200x4_8pg");
        assert_eq!(mode(200, 80, Adapter::Olivetti).name(), "640x400x2");
    }

    #[test]
    fn undefined_modes_are_illegal() {
        let err = get_mode(99, 80, Adapter::Mda, Monitor::Rgb, MEM).unwrap_err();
        assert_eq!(err, ModeError::NoSuchMode { adapter: Adapter::Mda, number: 99 });
        assert!(err.is_illegal_function_call());

        let err = get_mode(0, 20, Adapter::Cga, Monitor::Rgb, MEM).unwrap_err();
        assert_eq!(err, ModeError::NoSuchTextWidth { adapter: Adapter::Cga, columns: 20 });
        assert!(get_mode(7, 40, Adapter::Cga, Monitor::Rgb, MEM).is_err());
    }

    #[test]
    fn every_adapter_has_both_text_widths() {
        for adapter in Adapter::iter() {
            for width in [40, 80] {
                let m = mode(0, width, adapter);
                assert!(m.is_text_mode());
                assert_eq!(m.columns(), width);
                assert!(m.num_pages() >= 1);
            }
        }
    }

    #[test]
    fn width_switches() {
        assert_eq!(width_switch(1, 80, Adapter::Cga), Ok(2));
        assert_eq!(width_switch(2, 40, Adapter::Cga), Ok(1));
        assert_eq!(width_switch("640x200x2", 40, Adapter::Cga), Ok(1));
        assert_eq!(width_switch(9, 40, Adapter::Vga), Ok(1));
        assert_eq!(width_switch(5, 80, Adapter::Tandy), Ok(6));
        assert_eq!(width_switch(0, 20, Adapter::PcJr), Ok(3));
        assert_eq!(width_switch(3, 80, Adapter::Olivetti), Ok(3));
        assert!(matches!(
            width_switch(1, 20, Adapter::Cga),
            Err(ModeError::NoWidthSwitch { columns: 20, .. })
        ));
        assert!(width_switch(3, 40, Adapter::Cga).is_err());
    }

    #[test]
    fn width_change_from_current_mode() {
        let text = mode(0, 80, Adapter::Cga);
        assert_eq!(resolve_width_change(&text, 80, Adapter::Cga), Ok(None));
        assert_eq!(resolve_width_change(&text, 40, Adapter::Cga), Ok(Some(0)));
        // PCjr text goes to 20 columns only through SCREEN 3, which needs the mode number
        let jr_text = mode(0, 40, Adapter::PcJr);
        assert!(resolve_width_change(&jr_text, 20, Adapter::PcJr).is_err());

        let screen1 = mode(1, 40, Adapter::Cga);
        assert_eq!(resolve_width_change(&screen1, 80, Adapter::Cga), Ok(Some(2)));
        let screen9 = mode(9, 80, Adapter::Ega);
        assert_eq!(resolve_width_change(&screen9, 40, Adapter::Ega), Ok(Some(1)));
        let jr4 = mode(4, 40, Adapter::PcJr);
        assert_eq!(resolve_width_change(&jr4, 20, Adapter::PcJr), Ok(Some(3)));
    }

    #[test]
    fn legacy_mode_numbers() {
        assert_eq!(mode_number(&mode(0, 80, Adapter::Cga), false), 0);
        assert_eq!(mode_number(&mode(0, 40, Adapter::Cga), true), 3);
        assert_eq!(mode_number(&mode(0, 80, Adapter::Mda), true), 7);
        assert_eq!(mode_number(&mode(0, 80, Adapter::EgaMono), false), 7);
        assert_eq!(mode_number(&mode(0, 40, Adapter::Mda), false), 2);
        assert_eq!(mode_number(&mode(2, 80, Adapter::Cga), false), 6);
        assert_eq!(mode_number(&mode(9, 80, Adapter::Ega), false), 16);
        assert_eq!(mode_number(&mode(3, 80, Adapter::Olivetti), false), 0x40);
        assert_eq!(mode_number(&mode(3, 80, Adapter::Hercules), false), UNKNOWN_MODE_NUMBER);
        assert_eq!(mode_number(&mode(1, 40, Adapter::PcJr), false), UNKNOWN_MODE_NUMBER);
    }

    #[test]
    fn low_intensity_reaches_screen_1() {
        let low = resolve_mode(1, 40, Adapter::Cga, Monitor::Rgb, MEM, true).unwrap();
        assert_eq!(low.colourmap().palette(), &crate::colours::CGA4_LO_PALETTE_1);
        let high = get_mode(1, 40, Adapter::Cga, Monitor::Rgb, MEM).unwrap();
        assert_eq!(high.colourmap().palette(), &crate::colours::CGA4_HI_PALETTE_1);
    }

    #[test]
    fn screen_1_reports_mode_5_without_colour_burst() {
        let mut screen1 = mode(1, 40, Adapter::Cga);
        assert_eq!(mode_number(&screen1, false), 4);
        screen1.colourmap_mut().set_colorswitch(true);
        assert_eq!(mode_number(&screen1, true), 5);
    }
}
