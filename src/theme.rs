// SPDX-License-Identifier: MPL-2.0

//! Retro terminal themes
//!
//! The widget ships two looks: `cga` (green phosphor on black) and
//! `light-crt` (dark text on a pale tube). Both resolve to the same palette
//! shape so rendering code never branches on the theme itself.

use serde::{Deserialize, Serialize};

/// Which retro look to render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Cga,
    LightCrt,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Cga
    }
}

/// An sRGB color with unit-range channels, matching what cairo consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f64 / 255.0,
            g: ((hex >> 8) & 0xff) as f64 / 255.0,
            b: (hex & 0xff) as f64 / 255.0,
        }
    }
}

/// All colors used by the widget, derived from the active theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub text: Rgb,
    pub subtext: Rgb,
    pub accent: Rgb,
    pub danger: Rgb,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Cga => Palette {
                text: Rgb::from_hex(0x00ff66),
                subtext: Rgb::from_hex(0x00cc55),
                accent: Rgb::from_hex(0x00ff66),
                danger: Rgb::from_hex(0xff3366),
            },
            Theme::LightCrt => Palette {
                text: Rgb::from_hex(0x000000),
                subtext: Rgb::from_hex(0x333333),
                accent: Rgb::from_hex(0x00aa00),
                danger: Rgb::from_hex(0xb00020),
            },
        }
    }
}
