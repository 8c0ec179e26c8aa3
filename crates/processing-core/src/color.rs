//! Color space math and the intensity palette.
//!
//! Colors are sRGB triples in `[0.0, 1.0]`. Blending happens in one of
//! three spaces:
//! - **Lab:** CIE L*a*b* (D65), used between most palette anchors
//! - **HCL:** polar Lab with shortest-arc hue, used between gradient stops
//! - **RGB:** plain component interpolation, used only for red → purple
//!
//! Space conversions go through `palette`, always unclamped; only HCL
//! blends and final quantization clamp to the gamut.

use image::Rgba;
use palette::convert::FromColorUnclamped;
use palette::white_point::D65;
use palette::{Lab, Lch, Mix, Srgb};

/// Chroma below which a color is treated as having no hue, on the
/// `[0, 100]` lightness scale.
const ACHROMATIC_CHROMA: f64 = 0.015;

/// Lab components closer to zero than this have no stable hue angle.
const HUE_EPSILON: f64 = 0.01;

/// Intensity span covered by one palette blend.
pub const STEP_SIZE: f64 = 60.0;

/// Intensities at or below this map to the background color.
pub const INTENSITY_EPSILON: f64 = 0.001;

/// An sRGB color with floating point channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f64 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Whether every channel lies in `[0, 1]`.
    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Clamp every channel into `[0, 1]`.
    pub fn clamped(&self) -> Self {
        let c = |v: f64| v.clamp(0.0, 1.0);
        Self::new(c(self.r), c(self.g), c(self.b))
    }

    /// Opaque 8-bit pixel. Channels are clamped, widened to 16 bits with
    /// rounding, then truncated to their high byte.
    pub fn to_rgba8(&self) -> Rgba<u8> {
        let q = |v: f64| (((v.clamp(0.0, 1.0) * 65535.0 + 0.5) as u32) >> 8) as u8;
        Rgba([q(self.r), q(self.g), q(self.b), 255])
    }

    pub fn from_srgb(rgb: Srgb<f64>) -> Self {
        Self::new(rgb.red, rgb.green, rgb.blue)
    }

    pub fn srgb(&self) -> Srgb<f64> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// CIE L*a*b* relative to D65, with `L` in `[0, 100]`.
    pub fn lab(&self) -> Lab<D65, f64> {
        Lab::from_color_unclamped(self.srgb())
    }

    /// Convert back without gamut clamping.
    pub fn from_lab(lab: Lab<D65, f64>) -> Self {
        Self::from_srgb(Srgb::from_color_unclamped(lab))
    }

    /// Polar Lab. The hue is pinned to 0 where `atan2` is unstable.
    pub fn hcl(&self) -> Lch<D65, f64> {
        let lab = self.lab();
        let hue = if (lab.b - lab.a).abs() > HUE_EPSILON && lab.a.abs() > HUE_EPSILON {
            (lab.b.atan2(lab.a).to_degrees() + 360.0) % 360.0
        } else {
            0.0
        };
        Lch::new(lab.l, lab.a.hypot(lab.b), hue)
    }

    pub fn from_hcl(lch: Lch<D65, f64>) -> Self {
        Self::from_lab(Lab::from_color_unclamped(lch))
    }

    /// Interpolate in Lab. The result may fall outside the RGB gamut.
    pub fn blend_lab(&self, other: &Color, t: f64) -> Color {
        Self::from_lab(self.lab().mix(other.lab(), t))
    }

    /// Interpolate each sRGB channel directly.
    pub fn blend_rgb(&self, other: &Color, t: f64) -> Color {
        Self::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
        )
    }

    /// Interpolate in HCL along the shorter hue arc, clamped to the gamut.
    pub fn blend_hcl(&self, other: &Color, t: f64) -> Color {
        let from = self.hcl();
        let to = other.hcl();
        let mut h1 = from.hue.into_positive_degrees();
        let mut h2 = to.hue.into_positive_degrees();

        // a grey has no meaningful hue; borrow the other side's
        if from.chroma <= ACHROMATIC_CHROMA && to.chroma >= ACHROMATIC_CHROMA {
            h1 = h2;
        } else if to.chroma <= ACHROMATIC_CHROMA && from.chroma >= ACHROMATIC_CHROMA {
            h2 = h1;
        }

        Self::from_hcl(Lch::new(
            lerp(from.l, to.l, t),
            lerp(from.chroma, to.chroma, t),
            interp_angle(h1, h2, t),
        ))
        .clamped()
    }
}

/// The fixed seven-anchor palette for motion intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub blue: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
    pub purple: Color,
    pub black: Color,
}

impl Palette {
    pub const BACKGROUND_HEX: u32 = 0x30404d;
    pub const BLUE_HEX: u32 = 0x1e90ff; // DodgerBlue
    pub const GREEN_HEX: u32 = 0x228b22; // ForestGreen
    pub const YELLOW_HEX: u32 = 0xffd700; // Gold
    pub const RED_HEX: u32 = 0xdc143c; // Crimson
    pub const PURPLE_HEX: u32 = 0x800080;
    pub const BLACK_HEX: u32 = 0x0f001e;

    pub fn standard() -> Self {
        Self {
            background: Color::from_hex(Self::BACKGROUND_HEX),
            blue: Color::from_hex(Self::BLUE_HEX),
            green: Color::from_hex(Self::GREEN_HEX),
            yellow: Color::from_hex(Self::YELLOW_HEX),
            red: Color::from_hex(Self::RED_HEX),
            purple: Color::from_hex(Self::PURPLE_HEX),
            black: Color::from_hex(Self::BLACK_HEX),
        }
    }

    /// Map a segment's mean intensity to a color.
    ///
    /// Each [`STEP_SIZE`] band blends between two neighbouring anchors.
    /// Red → purple blends in RGB for a harsher transition; every other
    /// band blends in Lab. Above four steps the purple → black blend is
    /// stretched over five steps and saturates at black.
    pub fn segment_color(&self, intensity: f64) -> Color {
        if intensity <= INTENSITY_EPSILON {
            self.background
        } else if intensity <= STEP_SIZE {
            self.blue.blend_lab(&self.green, intensity / STEP_SIZE)
        } else if intensity <= 2.0 * STEP_SIZE {
            self.green
                .blend_lab(&self.yellow, (intensity - STEP_SIZE) / STEP_SIZE)
        } else if intensity <= 3.0 * STEP_SIZE {
            self.yellow
                .blend_lab(&self.red, (intensity - 2.0 * STEP_SIZE) / STEP_SIZE)
        } else if intensity <= 4.0 * STEP_SIZE {
            self.red
                .blend_rgb(&self.purple, (intensity - 3.0 * STEP_SIZE) / STEP_SIZE)
        } else {
            let f = ((intensity - 4.0 * STEP_SIZE) / (5.0 * STEP_SIZE)).min(1.0);
            self.purple.blend_lab(&self.black, f)
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// Map a mean intensity to a color using the standard palette.
pub fn segment_color(intensity: f64) -> Color {
    Palette::standard().segment_color(intensity)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

fn interp_angle(a0: f64, a1: f64, t: f64) -> f64 {
    let delta = ((a1 - a0) % 360.0 + 540.0) % 360.0 - 180.0;
    (a0 + t * delta + 360.0) % 360.0
}
