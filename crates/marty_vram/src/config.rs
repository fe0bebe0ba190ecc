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

    config.rs

    Video configuration, read from the [video] table of a TOML document.

    [video]
    adapter = "ega"
    monitor = "amber"
    video_memory = 262144
    initial_width = 80
    low_intensity = false

*/

use crate::{
    adapter::{Adapter, Monitor},
    error::ModeError,
    modes::{resolve_mode, ModeDescriptor},
};
use anyhow::{anyhow, Error};
use serde_derive::Deserialize;

pub const DEFAULT_VIDEO_MEMORY: usize = 262_144;
pub const DEFAULT_INITIAL_WIDTH: u32 = 80;

fn default_video_memory() -> usize {
    DEFAULT_VIDEO_MEMORY
}

fn default_initial_width() -> u32 {
    DEFAULT_INITIAL_WIDTH
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct VideoConfig {
    #[serde(default)]
    pub adapter: Adapter,
    #[serde(default)]
    pub monitor: Monitor,
    #[serde(default = "default_video_memory")]
    pub video_memory: usize,
    #[serde(default = "default_initial_width")]
    pub initial_width: u32,
    /// Use the low intensity CGA 4-colour palettes.
    #[serde(default)]
    pub low_intensity: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            adapter: Adapter::default(),
            monitor: Monitor::default(),
            video_memory: DEFAULT_VIDEO_MEMORY,
            initial_width: DEFAULT_INITIAL_WIDTH,
            low_intensity: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    video: Option<VideoConfig>,
}

impl VideoConfig {
    /// Parse and validate a TOML document. A document without a [video] table gives
    /// the default configuration.
    pub fn from_toml_str(toml_str: &str) -> Result<VideoConfig, Error> {
        let file: ConfigFile = toml::from_str(toml_str)?;
        let config = file.video.unwrap_or_default();
        config.validate()?;
        log::debug!(
            "Video config: {} adapter on {} monitor, {} bytes video memory",
            config.effective_adapter(),
            config.monitor,
            config.video_memory
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.video_memory == 0 {
            return Err(anyhow!("Invalid video memory size specified: {}", self.video_memory));
        }
        if self.initial_width != 40 && self.initial_width != 80 {
            return Err(anyhow!(
                "Invalid initial width specified: {}. Expected 40 or 80",
                self.initial_width
            ));
        }
        Ok(())
    }

    /// The adapter presented to programs, given the monitor it drives.
    pub fn effective_adapter(&self) -> Adapter {
        self.adapter.with_monitor(self.monitor)
    }

    /// Resolve a SCREEN number and width with this configuration's adapter, monitor,
    /// memory size and palette intensity.
    pub fn mode(&self, number: u8, width: u32) -> Result<ModeDescriptor, ModeError> {
        resolve_mode(
            number,
            width,
            self.effective_adapter(),
            self.monitor,
            self.video_memory,
            self.low_intensity,
        )
    }

    /// Resolve the text mode the display starts up in.
    pub fn initial_mode(&self) -> Result<ModeDescriptor, ModeError> {
        self.mode(0, self.initial_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let config = VideoConfig::from_toml_str("").unwrap();
        assert_eq!(config, VideoConfig::default());
        assert_eq!(config.adapter, Adapter::Vga);
        assert_eq!(config.initial_mode().unwrap().name(), "vgatext80");
    }

    #[test]
    fn parses_video_table() {
        let config = VideoConfig::from_toml_str(
            r#"
            [video]
            adapter = "ega"
            monitor = "amber"
            video_memory = 131072
            initial_width = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.adapter, Adapter::Ega);
        assert_eq!(config.monitor, Monitor::Amber);
        assert_eq!(config.effective_adapter(), Adapter::EgaMono);
        let mode = config.initial_mode().unwrap();
        assert_eq!(mode.name(), "ega_monotext40");
        assert!(mode.is_mono());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(VideoConfig::from_toml_str("[video]\nadapter = \"cga_old\"").is_err());
        assert!(VideoConfig::from_toml_str("[video]\ninitial_width = 20").is_err());
        assert!(VideoConfig::from_toml_str("[video]\nvideo_memory = 0").is_err());
    }

    #[test]
    fn low_intensity_applies_to_screen_1() {
        let config = VideoConfig::from_toml_str("[video]\nadapter = \"cga\"\nlow_intensity = true").unwrap();
        assert!(config.low_intensity);
        let screen1 = config.mode(1, 40).unwrap();
        assert_eq!(screen1.colourmap().palette(), &crate::colours::CGA4_LO_PALETTE_1);

        let config = VideoConfig::from_toml_str("[video]\nadapter = \"cga\"").unwrap();
        let screen1 = config.mode(1, 40).unwrap();
        assert_eq!(screen1.colourmap().palette(), &crate::colours::CGA4_HI_PALETTE_1);
    }

    #[test]
    fn pcjr_adapter_name() {
        let config = VideoConfig::from_toml_str("[video]\nadapter = \"pcjr\"").unwrap();
        assert_eq!(config.adapter, Adapter::PcJr);
    }
}
