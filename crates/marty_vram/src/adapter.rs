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

    adapter.rs

    Display adapter and monitor types.

*/

use core::fmt;
use serde_derive::Deserialize;
use std::{fmt::Display, str::FromStr};
use strum_macros::EnumIter;

/// The display adapter family being emulated. Each adapter defines its own set of
/// screen modes and width switches.
#[derive(Copy, Clone, Debug, Default, Deserialize, Hash, Eq, PartialEq, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Adapter {
    Cga,
    Ega,
    #[serde(rename = "ega_mono")]
    EgaMono,
    #[default]
    Vga,
    Mda,
    Hercules,
    Tandy,
    PcJr,
    Olivetti,
}

impl FromStr for Adapter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String>
    where
        Self: Sized,
    {
        match s.to_lowercase().as_str() {
            "cga" => Ok(Adapter::Cga),
            "ega" => Ok(Adapter::Ega),
            "ega_mono" => Ok(Adapter::EgaMono),
            "vga" => Ok(Adapter::Vga),
            "mda" => Ok(Adapter::Mda),
            "hercules" => Ok(Adapter::Hercules),
            "tandy" => Ok(Adapter::Tandy),
            "pcjr" => Ok(Adapter::PcJr),
            "olivetti" => Ok(Adapter::Olivetti),
            _ => Err(format!("Bad value for adapter: {}", s)),
        }
    }
}

impl Display for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Adapter::Cga => write!(f, "CGA"),
            Adapter::Ega => write!(f, "EGA"),
            Adapter::EgaMono => write!(f, "EGA (monochrome)"),
            Adapter::Vga => write!(f, "VGA"),
            Adapter::Mda => write!(f, "MDA"),
            Adapter::Hercules => write!(f, "Hercules"),
            Adapter::Tandy => write!(f, "Tandy"),
            Adapter::PcJr => write!(f, "PCjr"),
            Adapter::Olivetti => write!(f, "Olivetti"),
        }
    }
}

impl Adapter {
    /// Tandy 1000 and IBM PCjr share the video gate array and mode set.
    pub fn is_tandy_family(&self) -> bool {
        matches!(self, Adapter::Tandy | Adapter::PcJr)
    }

    /// Adapters driving an NTSC color burst signal.
    pub fn has_colorburst(&self) -> bool {
        matches!(self, Adapter::Cga | Adapter::Tandy | Adapter::PcJr)
    }

    /// Only the real CGA has the RGB "mode 5" palette.
    pub fn has_mode_5(&self) -> bool {
        matches!(self, Adapter::Cga)
    }

    pub fn is_mono(&self) -> bool {
        matches!(self, Adapter::Mda | Adapter::Hercules | Adapter::EgaMono)
    }

    /// Resolve the adapter actually presented to programs. An EGA card driving a
    /// monochrome monitor runs in its monochrome configuration.
    pub fn with_monitor(self, monitor: Monitor) -> Adapter {
        match self {
            Adapter::Ega if monitor.is_mono() => Adapter::EgaMono,
            _ => self,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Deserialize, Hash, Eq, PartialEq, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Monitor {
    #[default]
    Rgb,
    Composite,
    Green,
    Amber,
    Grey,
    Mono,
}

impl FromStr for Monitor {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String>
    where
        Self: Sized,
    {
        match s.to_lowercase().as_str() {
            "rgb" => Ok(Monitor::Rgb),
            "composite" => Ok(Monitor::Composite),
            "green" => Ok(Monitor::Green),
            "amber" => Ok(Monitor::Amber),
            "grey" => Ok(Monitor::Grey),
            "mono" => Ok(Monitor::Mono),
            _ => Err(format!("Bad value for monitor: {}", s)),
        }
    }
}

impl Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Monitor::Rgb => write!(f, "RGB"),
            Monitor::Composite => write!(f, "Composite"),
            Monitor::Green => write!(f, "Green phosphor"),
            Monitor::Amber => write!(f, "Amber phosphor"),
            Monitor::Grey => write!(f, "Grey phosphor"),
            Monitor::Mono => write!(f, "Monochrome"),
        }
    }
}

impl Monitor {
    /// The phosphor tint of a monochrome monitor, or None for colour monitors.
    pub fn mono_tint(&self) -> Option<(u8, u8, u8)> {
        match self {
            Monitor::Green | Monitor::Mono => Some((0, 255, 0)),
            Monitor::Amber => Some((255, 128, 0)),
            Monitor::Grey => Some((255, 255, 255)),
            Monitor::Rgb | Monitor::Composite => None,
        }
    }

    pub fn is_mono(&self) -> bool {
        self.mono_tint().is_some()
    }
}
