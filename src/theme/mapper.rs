//! Semantic role mapping: palette bands to primary, secondary and accent.

use serde::Serialize;

use crate::theme::{
    color::ColorValue,
    swatch::{Palette, SwatchName},
};

/// Share of white mixed into the primary when the palette has no light vibrant band.
const SECONDARY_TINT: f64 = 0.7;
/// Share of black mixed into the primary when the palette has no dark vibrant band.
const ACCENT_SHADE: f64 = 0.7;

/// Raw brand roles before any contrast work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleColors {
    /// Main brand color.
    pub primary: ColorValue,
    /// Light companion color.
    pub secondary: ColorValue,
    /// Dark companion color.
    pub accent: ColorValue,
}

/// Resolve the three brand roles from a palette.
///
/// `secondary` and `accent` fall back to tints of the *resolved* primary, so a
/// palette without a vibrant band still yields a triad anchored on the same color.
pub fn map_roles(palette: &Palette) -> RoleColors {
    let primary = palette
        .color(SwatchName::Vibrant)
        .or_else(|| palette.color(SwatchName::Muted))
        .unwrap_or(ColorValue::DEFAULT_PRIMARY);

    let secondary = palette
        .color(SwatchName::LightVibrant)
        .unwrap_or_else(|| primary.mix(ColorValue::WHITE, SECONDARY_TINT));

    let accent = palette
        .color(SwatchName::DarkVibrant)
        .unwrap_or_else(|| primary.mix(ColorValue::BLACK, ACCENT_SHADE));

    RoleColors {
        primary,
        secondary,
        accent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_palette_anchors_on_default_blue() {
        let roles = map_roles(&Palette::empty());
        assert_eq!(roles.primary, ColorValue::DEFAULT_PRIMARY);
        assert_eq!(
            roles.secondary,
            ColorValue::DEFAULT_PRIMARY.mix(ColorValue::WHITE, 0.7)
        );
        assert_eq!(
            roles.accent,
            ColorValue::DEFAULT_PRIMARY.mix(ColorValue::BLACK, 0.7)
        );
    }

    #[test]
    fn muted_replaces_missing_vibrant() {
        let muted = ColorValue::new(120, 110, 100);
        let roles = map_roles(&Palette::from_colors([(SwatchName::Muted, muted)]));
        assert_eq!(roles.primary, muted);
        assert_eq!(roles.secondary, muted.mix(ColorValue::WHITE, 0.7));
        assert_eq!(roles.accent, muted.mix(ColorValue::BLACK, 0.7));
    }

    #[test]
    fn vibrant_wins_over_muted() {
        let vibrant = ColorValue::new(200, 30, 30);
        let muted = ColorValue::new(120, 110, 100);
        let roles = map_roles(&Palette::from_colors([
            (SwatchName::Muted, muted),
            (SwatchName::Vibrant, vibrant),
        ]));
        assert_eq!(roles.primary, vibrant);
    }

    #[test]
    fn explicit_bands_are_used_as_is() {
        let light = ColorValue::new(250, 200, 200);
        let dark = ColorValue::new(60, 0, 0);
        let roles = map_roles(&Palette::from_colors([
            (SwatchName::Vibrant, ColorValue::new(255, 0, 0)),
            (SwatchName::LightVibrant, light),
            (SwatchName::DarkVibrant, dark),
        ]));
        assert_eq!(roles.secondary, light);
        assert_eq!(roles.accent, dark);
    }

    #[test]
    fn single_red_vibrant_derives_tint_and_shade() {
        let red = ColorValue::new(255, 0, 0);
        let roles = map_roles(&Palette::from_colors([(SwatchName::Vibrant, red)]));
        assert_eq!(roles.primary, red);
        assert_eq!(roles.secondary.red(), 255);
        assert!(roles.secondary.green() > 150 && roles.secondary.green() < 200);
        assert!(roles.accent.red() < 90 && roles.accent.green() == 0);
    }
}
