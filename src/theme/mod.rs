//! Palette-to-theme pipeline: colors, swatches, role mapping, contrast and publication format.

pub mod builder;
pub mod color;
pub mod contrast;
pub mod mapper;
pub mod swatch;

pub use self::builder::{Role, RoleAssignment, RolePair, ThemeBuilder, ThemeVariableSet};
pub use self::color::{ColorError, ColorValue, HslTriplet};
pub use self::contrast::{ContrastCheck, ContrastEnforcer, ensure_contrast, ensure_contrast_hex};
pub use self::mapper::{RoleColors, map_roles};
pub use self::swatch::{Palette, PaletteBuilder, Swatch, SwatchName};
