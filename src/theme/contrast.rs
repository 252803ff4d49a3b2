//! Minimum-contrast enforcement for foreground colors drawn on a role background.

use crate::theme::color::ColorValue;

/// WCAG AA ratio for normal text.
pub const DEFAULT_MIN_RATIO: f64 = 4.5;
/// Lightness moved per adjustment step (5% of the range).
const STEP: f32 = 0.05;
const MAX_ITERATIONS: usize = 20;

/// Outcome of [`ensure_contrast_hex`], kept as text so malformed input survives untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastCheck {
    /// Foreground to use, as `#RRGGBB` (or the untouched input when the background was unreadable).
    pub foreground: String,
    /// Achieved ratio, `None` when the background could not be parsed.
    pub ratio: Option<f64>,
    /// True when the returned foreground differs from the candidate.
    pub adjusted: bool,
}

/// Configured enforcer shared by the theme builder and the contrast check route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastEnforcer {
    min_ratio: f64,
}

impl Default for ContrastEnforcer {
    fn default() -> Self {
        Self {
            min_ratio: DEFAULT_MIN_RATIO,
        }
    }
}

impl ContrastEnforcer {
    /// Enforcer targeting `min_ratio`; non-finite or sub-1 values fall back to 4.5.
    pub fn new(min_ratio: f64) -> Self {
        if min_ratio.is_finite() && min_ratio >= 1.0 {
            Self { min_ratio }
        } else {
            Self::default()
        }
    }

    /// Target ratio.
    pub fn min_ratio(&self) -> f64 {
        self.min_ratio
    }

    /// See [`ensure_contrast`].
    pub fn ensure(&self, background: ColorValue, candidate: ColorValue) -> ColorValue {
        ensure_contrast(background, candidate, self.min_ratio)
    }

    /// See [`ensure_contrast_hex`].
    pub fn ensure_hex(&self, background: &str, candidate: &str) -> ContrastCheck {
        ensure_contrast_hex(background, candidate, self.min_ratio)
    }
}

/// Return a foreground that reaches `min_ratio` against `background`.
///
/// The candidate is returned untouched when it already passes. Otherwise it is
/// stepped 5% lighter (dark background) or darker (light background) up to 20
/// times. If that is not enough the result is white for dark backgrounds and
/// `#111111` for light ones; when that fallback itself misses the ratio, the
/// better of the two fallbacks is used. Only the foreground is ever adjusted.
pub fn ensure_contrast(background: ColorValue, candidate: ColorValue, min_ratio: f64) -> ColorValue {
    if candidate.contrast_ratio(&background) >= min_ratio {
        return candidate;
    }

    let lighten = background.is_dark();
    let mut current = candidate;
    for _ in 0..MAX_ITERATIONS {
        current = if lighten {
            current.lighten(STEP)
        } else {
            current.darken(STEP)
        };
        if current.contrast_ratio(&background) >= min_ratio {
            return current;
        }
    }

    let (preferred, other) = if lighten {
        (ColorValue::WHITE, ColorValue::NEAR_BLACK)
    } else {
        (ColorValue::NEAR_BLACK, ColorValue::WHITE)
    };

    let preferred_ratio = preferred.contrast_ratio(&background);
    if preferred_ratio >= min_ratio || preferred_ratio >= other.contrast_ratio(&background) {
        preferred
    } else {
        other
    }
}

/// Text form of [`ensure_contrast`].
///
/// An unreadable background returns the candidate unchanged; an unreadable
/// candidate starts the search from `#111111`.
pub fn ensure_contrast_hex(background: &str, candidate: &str, min_ratio: f64) -> ContrastCheck {
    let Ok(background) = ColorValue::from_hex(background) else {
        return ContrastCheck {
            foreground: candidate.to_string(),
            ratio: None,
            adjusted: false,
        };
    };

    let parsed = ColorValue::from_hex(candidate).ok();
    let start = parsed.unwrap_or(ColorValue::NEAR_BLACK);
    let result = ensure_contrast(background, start, min_ratio);

    ContrastCheck {
        foreground: result.to_hex(),
        ratio: Some(result.contrast_ratio(&background)),
        adjusted: parsed != Some(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(value: &str) -> ColorValue {
        ColorValue::from_hex(value).unwrap()
    }

    #[test]
    fn passing_candidate_is_untouched() {
        let navy = hex("#1E3A8A");
        assert_eq!(ensure_contrast(navy, ColorValue::WHITE, 4.5), ColorValue::WHITE);
    }

    #[test]
    fn light_background_darkens_candidate() {
        let background = hex("#F5F5F5");
        let candidate = hex("#A0A0A0");
        let result = ensure_contrast(background, candidate, 4.5);
        assert!(result.contrast_ratio(&background) >= 4.5);
        assert!(result.to_hsl().lightness < candidate.to_hsl().lightness);
    }

    #[test]
    fn dark_background_lightens_candidate() {
        let background = hex("#101828");
        let candidate = hex("#334155");
        let result = ensure_contrast(background, candidate, 4.5);
        assert!(result.contrast_ratio(&background) >= 4.5);
        assert!(result.to_hsl().lightness > candidate.to_hsl().lightness);
    }

    #[test]
    fn pure_red_falls_back_to_near_black() {
        let red = hex("#FF0000");
        assert!(red.is_dark());
        assert!(ColorValue::WHITE.contrast_ratio(&red) < 4.5);

        let result = ensure_contrast(red, ColorValue::WHITE, 4.5);
        assert_eq!(result, ColorValue::NEAR_BLACK);
        assert!(result.contrast_ratio(&red) >= 4.5);
    }

    #[test]
    fn unreachable_ratio_returns_a_fallback() {
        let gray = hex("#777777");
        let result = ensure_contrast(gray, hex("#787878"), 21.0);
        assert!(result == ColorValue::WHITE || result == ColorValue::NEAR_BLACK);
    }

    #[test]
    fn hex_form_keeps_candidate_when_background_is_invalid() {
        let check = ensure_contrast_hex("garbage", "#ABCDEF", 4.5);
        assert_eq!(check.foreground, "#ABCDEF");
        assert_eq!(check.ratio, None);
        assert!(!check.adjusted);
    }

    #[test]
    fn hex_form_substitutes_default_for_invalid_candidate() {
        let check = ensure_contrast_hex("#FFFFFF", "??", 4.5);
        assert_eq!(check.foreground, "#111111");
        assert!(check.ratio.unwrap() >= 4.5);
        assert!(check.adjusted);
    }

    #[test]
    fn enforcer_rejects_nonsense_ratio() {
        assert_eq!(ContrastEnforcer::new(f64::NAN).min_ratio(), DEFAULT_MIN_RATIO);
        assert_eq!(ContrastEnforcer::new(0.2).min_ratio(), DEFAULT_MIN_RATIO);
        assert_eq!(ContrastEnforcer::new(7.0).min_ratio(), 7.0);
    }
}
