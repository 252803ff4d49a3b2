//! Named tonal-band swatches and the palette produced by one extraction run.

use std::fmt;

use serde::Serialize;

use crate::theme::color::ColorValue;

/// Tonal band a swatch represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SwatchName {
    /// Saturated, mid lightness.
    Vibrant,
    /// Desaturated, mid lightness.
    Muted,
    /// Saturated, dark.
    DarkVibrant,
    /// Saturated, light.
    LightVibrant,
    /// Desaturated, dark.
    DarkMuted,
    /// Desaturated, light.
    LightMuted,
}

impl SwatchName {
    /// Every band, in palette order.
    pub const ALL: [SwatchName; 6] = [
        SwatchName::Vibrant,
        SwatchName::Muted,
        SwatchName::DarkVibrant,
        SwatchName::LightVibrant,
        SwatchName::DarkMuted,
        SwatchName::LightMuted,
    ];

    /// Display name of the band.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SwatchName::Vibrant => "Vibrant",
            SwatchName::Muted => "Muted",
            SwatchName::DarkVibrant => "DarkVibrant",
            SwatchName::LightVibrant => "LightVibrant",
            SwatchName::DarkMuted => "DarkMuted",
            SwatchName::LightMuted => "LightMuted",
        }
    }

    const fn index(&self) -> usize {
        match self {
            SwatchName::Vibrant => 0,
            SwatchName::Muted => 1,
            SwatchName::DarkVibrant => 2,
            SwatchName::LightVibrant => 3,
            SwatchName::DarkMuted => 4,
            SwatchName::LightMuted => 5,
        }
    }
}

impl fmt::Display for SwatchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One band slot. `color` is `None` when the image has nothing in that band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    /// Band this slot represents.
    pub name: SwatchName,
    /// Representative color, if any.
    pub color: Option<ColorValue>,
    /// Number of sampled pixels behind the color (0 when absent).
    pub population: u32,
}

/// Every band of one extraction run. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    swatches: [Swatch; 6],
}

impl Palette {
    /// Palette with every band absent.
    pub fn empty() -> Self {
        Self {
            swatches: SwatchName::ALL.map(|name| Swatch {
                name,
                color: None,
                population: 0,
            }),
        }
    }

    /// Start a palette from explicit band colors (populations are left at zero).
    pub fn from_colors<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = (SwatchName, ColorValue)>,
    {
        colors
            .into_iter()
            .fold(PaletteBuilder::default(), |builder, (name, color)| {
                builder.with(name, color, 0)
            })
            .build()
    }

    /// Color of a band, if present.
    pub fn color(&self, name: SwatchName) -> Option<ColorValue> {
        self.swatches[name.index()].color
    }

    /// Full slot of a band.
    pub fn swatch(&self, name: SwatchName) -> &Swatch {
        &self.swatches[name.index()]
    }

    /// All slots in palette order.
    pub fn swatches(&self) -> impl Iterator<Item = &Swatch> {
        self.swatches.iter()
    }

    /// True when no band holds a color.
    pub fn is_empty(&self) -> bool {
        self.swatches.iter().all(|swatch| swatch.color.is_none())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::empty()
    }
}

/// Accumulates band assignments before freezing them into a [`Palette`].
#[derive(Debug, Clone)]
pub struct PaletteBuilder {
    palette: Palette,
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self {
            palette: Palette::empty(),
        }
    }
}

impl PaletteBuilder {
    /// Fill a band, replacing any earlier assignment.
    pub fn with(mut self, name: SwatchName, color: ColorValue, population: u32) -> Self {
        self.palette.swatches[name.index()] = Swatch {
            name,
            color: Some(color),
            population,
        };
        self
    }

    /// Freeze the palette.
    pub fn build(self) -> Palette {
        self.palette
    }
}
