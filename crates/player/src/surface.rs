// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Straight RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Opaque color from a 24-bit hex value such as `0x121212`.
    pub fn from_hex(hex: u32) -> Self { Self::from_hex_alpha(hex, 1.0) }

    /// Color from a 24-bit hex value with the given opacity.
    pub fn from_hex_alpha(hex: u32, alpha: f32) -> Self {
        let r = f32::from(((hex >> 16) & 0xFF) as u8) / 255.0;
        let g = f32::from(((hex >> 8) & 0xFF) as u8) / 255.0;
        let b = f32::from((hex & 0xFF) as u8) / 255.0;
        Rgba { r, g, b, a: alpha }
    }
}

impl Default for Rgba {
    fn default() -> Self { Rgba::BLACK }
}

/// Rendering target an engine draws video frames into.
///
/// Supplied by the host UI once it exists; the player only forwards it to the
/// engine and paints its background.
pub trait RenderSurface: Send + Sync {
    fn set_background_color(&self, color: Rgba);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_components() {
        let color = Rgba::from_hex(0xFF_80_00);
        assert!((color.r - 1.0).abs() < f32::EPSILON);
        assert!((color.g - 128.0 / 255.0).abs() < f32::EPSILON);
        assert!(color.b.abs() < f32::EPSILON);
        assert!((color.a - 1.0).abs() < f32::EPSILON);
        assert_eq!(Rgba::from_hex(0x000000), Rgba::BLACK);
        assert_eq!(Rgba::from_hex(0xFFFFFF), Rgba::WHITE);
    }
}
