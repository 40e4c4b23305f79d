// board/color.rs
//
// Abstraction level → note color. Piecewise-linear gradient over three fixed
// stops: concrete ideas are green, the middle ground amber, fully abstract
// red. Continuous at the midpoint: both halves meet exactly on the amber
// stop.

use serde::Serialize;

use crate::board::notes::ABSTRACTION_MAX;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. "#4caf50".
    pub fn css_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Gradient stops at abstraction 0, 50, and 100.
pub const STOP_CONCRETE: Rgb = Rgb::new(0x4c, 0xaf, 0x50);
pub const STOP_MIDWAY: Rgb = Rgb::new(0xff, 0xc1, 0x07);
pub const STOP_ABSTRACT: Rgb = Rgb::new(0xf4, 0x43, 0x36);

const MIDPOINT: u8 = ABSTRACTION_MAX / 2;

/// Channel-wise linear interpolation between two colors, t in [0, 1].
fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

/// Color for an abstraction level. Levels above the scale are clamped.
pub fn color_for(abstraction: u8) -> Rgb {
    let level = abstraction.min(ABSTRACTION_MAX);
    if level <= MIDPOINT {
        lerp_rgb(STOP_CONCRETE, STOP_MIDWAY, level as f32 / MIDPOINT as f32)
    } else {
        lerp_rgb(
            STOP_MIDWAY,
            STOP_ABSTRACT,
            (level - MIDPOINT) as f32 / (ABSTRACTION_MAX - MIDPOINT) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_the_stops() {
        assert_eq!(color_for(0), STOP_CONCRETE);
        assert_eq!(color_for(50), STOP_MIDWAY);
        assert_eq!(color_for(100), STOP_ABSTRACT);
    }

    #[test]
    fn midpoint_agrees_across_both_branches() {
        // Lower branch at t=1 and upper branch at t=0 must meet exactly.
        let from_below = lerp_rgb(STOP_CONCRETE, STOP_MIDWAY, 1.0);
        let from_above = lerp_rgb(STOP_MIDWAY, STOP_ABSTRACT, 0.0);
        assert_eq!(from_below, from_above);
        assert_eq!(color_for(50), from_below);
    }

    #[test]
    fn gradient_has_no_jumps() {
        // Adjacent levels never differ by more than a few units per channel.
        let mut prev = color_for(0);
        for level in 1..=100u8 {
            let next = color_for(level);
            assert!((next.r as i16 - prev.r as i16).abs() <= 5);
            assert!((next.g as i16 - prev.g as i16).abs() <= 5);
            assert!((next.b as i16 - prev.b as i16).abs() <= 5);
            prev = next;
        }
    }

    #[test]
    fn above_scale_clamps_to_abstract() {
        assert_eq!(color_for(255), STOP_ABSTRACT);
    }

    #[test]
    fn css_hex_formats_lowercase() {
        assert_eq!(STOP_CONCRETE.css_hex(), "#4caf50");
        assert_eq!(Rgb::new(0, 0, 0).css_hex(), "#000000");
    }
}
