// Simple color struct, created from an unsigned 32 representing RRGGBB,
// with a separate floating point opacity so it maps straight onto CSS rgba()

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub fn from_u32(num: u32, a: f64) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Color { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Color {
        Color { a, ..self }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

const TEAL: u32 = 0x00d4aa;
const TEAL_DARK: u32 = 0x00a887;
const VIOLET: u32 = 0x7c3aed;
const WHITE: u32 = 0xffffff;
const SLATE: u32 = 0x1e293b;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    // Anything that isn't explicitly "light" gets the dark background look
    pub fn from_attribute(value: Option<&str>) -> Theme {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                particles: vec![
                    Color::from_u32(TEAL, 0.6),
                    Color::from_u32(VIOLET, 0.6),
                    Color::from_u32(WHITE, 0.4),
                    Color::from_u32(TEAL, 0.3),
                    Color::from_u32(VIOLET, 0.3),
                ],
                edge: Color::from_u32(TEAL, 1.0),
            },
            Theme::Light => Palette {
                particles: vec![
                    Color::from_u32(TEAL_DARK, 0.6),
                    Color::from_u32(VIOLET, 0.5),
                    Color::from_u32(SLATE, 0.25),
                    Color::from_u32(TEAL_DARK, 0.3),
                    Color::from_u32(VIOLET, 0.25),
                ],
                edge: Color::from_u32(TEAL_DARK, 1.0),
            },
        }
    }
}

// Particle fill colors plus the base color for connecting lines. The edge
// alpha is replaced per line by the distance falloff.
#[derive(Clone, Debug)]
pub struct Palette {
    pub particles: Vec<Color>,
    pub edge: Color,
}

impl Palette {
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        self.particles.choose(rng).copied().unwrap_or(self.edge)
    }
}
