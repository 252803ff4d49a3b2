//! Deterministic median-cut quantization and vibrant/muted band classification.

use std::collections::BTreeMap;

use crate::theme::{
    color::ColorValue,
    swatch::{Palette, PaletteBuilder, SwatchName},
};

/// Pixels more transparent than this are ignored.
const MIN_ALPHA: u8 = 125;
/// Pixels with every channel above this are treated as background white.
const WHITE_CUTOFF: u8 = 250;
/// Histogram precision per channel.
const SIGNIFICANT_BITS: u8 = 5;

const WEIGHT_SATURATION: f32 = 3.0;
const WEIGHT_LIGHTNESS: f32 = 6.5;
const WEIGHT_POPULATION: f32 = 0.5;

/// Lightness/saturation window a band accepts, with its ideal values.
#[derive(Debug, Clone, Copy)]
struct BandTarget {
    name: SwatchName,
    lightness: (f32, f32, f32),
    saturation: (f32, f32, f32),
}

const DARK: (f32, f32, f32) = (0.0, 0.26, 0.45);
const NORMAL: (f32, f32, f32) = (0.3, 0.5, 0.7);
const LIGHT: (f32, f32, f32) = (0.55, 0.74, 1.0);
const VIBRANT: (f32, f32, f32) = (0.35, 1.0, 1.0);
const MUTED: (f32, f32, f32) = (0.0, 0.3, 0.4);

/// Bands in selection order; earlier bands get first pick of the candidates.
const TARGETS: [BandTarget; 6] = [
    BandTarget {
        name: SwatchName::Vibrant,
        lightness: NORMAL,
        saturation: VIBRANT,
    },
    BandTarget {
        name: SwatchName::LightVibrant,
        lightness: LIGHT,
        saturation: VIBRANT,
    },
    BandTarget {
        name: SwatchName::DarkVibrant,
        lightness: DARK,
        saturation: VIBRANT,
    },
    BandTarget {
        name: SwatchName::Muted,
        lightness: NORMAL,
        saturation: MUTED,
    },
    BandTarget {
        name: SwatchName::LightMuted,
        lightness: LIGHT,
        saturation: MUTED,
    },
    BandTarget {
        name: SwatchName::DarkMuted,
        lightness: DARK,
        saturation: MUTED,
    },
];

/// One representative color produced by median cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Population-weighted mean color of the box.
    pub color: ColorValue,
    /// Pixels that fell into the box.
    pub population: u32,
    saturation: f32,
    lightness: f32,
}

impl Candidate {
    fn new(color: ColorValue, population: u32) -> Self {
        let hsl = color.to_hsl();
        Self {
            color,
            population,
            saturation: hsl.saturation / 100.0,
            lightness: hsl.lightness / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bin {
    key: [u8; 3],
    count: u32,
    sum: [u64; 3],
}

#[derive(Debug, Clone)]
struct ColorBox {
    bins: Vec<Bin>,
}

impl ColorBox {
    fn population(&self) -> u64 {
        self.bins.iter().map(|bin| u64::from(bin.count)).sum()
    }

    fn splittable(&self) -> bool {
        self.bins.len() > 1
    }

    fn widest_axis(&self) -> usize {
        (0..3)
            .map(|axis| {
                let min = self.bins.iter().map(|bin| bin.key[axis]).min().unwrap_or(0);
                let max = self.bins.iter().map(|bin| bin.key[axis]).max().unwrap_or(0);
                (axis, max - min)
            })
            // first axis wins ties
            .fold((0, 0), |best, current| if current.1 > best.1 { current } else { best })
            .0
    }

    fn split(mut self) -> (ColorBox, ColorBox) {
        let axis = self.widest_axis();
        self.bins
            .sort_by(|a, b| a.key[axis].cmp(&b.key[axis]).then(a.key.cmp(&b.key)));

        let half = self.population() / 2;
        let mut running = 0u64;
        let mut index = 1;
        for (position, bin) in self.bins.iter().enumerate() {
            running += u64::from(bin.count);
            if running >= half {
                index = position + 1;
                break;
            }
        }
        let index = index.clamp(1, self.bins.len() - 1);

        let upper = self.bins.split_off(index);
        (self, ColorBox { bins: upper })
    }

    fn average(&self) -> Candidate {
        let count = self.population().max(1);
        let mut total = [0u64; 3];
        for bin in &self.bins {
            for (channel, sum) in total.iter_mut().zip(bin.sum) {
                *channel += sum;
            }
        }
        let mean = |sum: u64| ((sum + count / 2) / count).min(255) as u8;
        Candidate::new(
            ColorValue::new(mean(total[0]), mean(total[1]), mean(total[2])),
            u32::try_from(self.population()).unwrap_or(u32::MAX),
        )
    }
}

/// Reduce RGBA pixels to at most `max_colors` candidates, most populous first.
pub fn quantize<I>(pixels: I, max_colors: usize) -> Vec<Candidate>
where
    I: IntoIterator<Item = [u8; 4]>,
{
    let shift = 8 - SIGNIFICANT_BITS;
    let mut histogram: BTreeMap<[u8; 3], Bin> = BTreeMap::new();
    for [r, g, b, a] in pixels {
        if a < MIN_ALPHA || (r > WHITE_CUTOFF && g > WHITE_CUTOFF && b > WHITE_CUTOFF) {
            continue;
        }
        let key = [r >> shift, g >> shift, b >> shift];
        let bin = histogram.entry(key).or_insert(Bin {
            key,
            count: 0,
            sum: [0; 3],
        });
        bin.count += 1;
        bin.sum[0] += u64::from(r);
        bin.sum[1] += u64::from(g);
        bin.sum[2] += u64::from(b);
    }

    if histogram.is_empty() {
        return Vec::new();
    }

    let mut boxes = vec![ColorBox {
        bins: histogram.into_values().collect(),
    }];

    while boxes.len() < max_colors.max(1) {
        let next = boxes
            .iter()
            .enumerate()
            .filter(|(_, candidate)| candidate.splittable())
            .fold(None::<(usize, u64)>, |best, (index, candidate)| {
                let population = candidate.population();
                match best {
                    Some((_, best_population)) if best_population >= population => best,
                    _ => Some((index, population)),
                }
            });
        let Some((index, _)) = next else {
            break;
        };

        let (lower, upper) = boxes.swap_remove(index).split();
        boxes.push(lower);
        boxes.push(upper);
    }

    let mut candidates: Vec<Candidate> = boxes.iter().map(ColorBox::average).collect();
    candidates.sort_by(|a, b| {
        b.population
            .cmp(&a.population)
            .then_with(|| a.color.to_hex().cmp(&b.color.to_hex()))
    });
    candidates
}

/// Assign candidates to the six bands, each candidate used at most once.
pub fn classify(candidates: &[Candidate]) -> Palette {
    let max_population = candidates
        .iter()
        .map(|candidate| candidate.population)
        .max()
        .unwrap_or(0)
        .max(1);

    let mut used = vec![false; candidates.len()];
    let mut builder = PaletteBuilder::default();

    for target in TARGETS {
        let mut best: Option<(usize, f32)> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            if used[index] || !within(candidate, &target) {
                continue;
            }
            let score = score(candidate, &target, max_population);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        if let Some((index, _)) = best {
            used[index] = true;
            let chosen = candidates[index];
            builder = builder.with(target.name, chosen.color, chosen.population);
        }
    }

    builder.build()
}

fn within(candidate: &Candidate, target: &BandTarget) -> bool {
    let (min_l, _, max_l) = target.lightness;
    let (min_s, _, max_s) = target.saturation;
    (min_l..=max_l).contains(&candidate.lightness) && (min_s..=max_s).contains(&candidate.saturation)
}

fn score(candidate: &Candidate, target: &BandTarget, max_population: u32) -> f32 {
    let closeness = |value: f32, ideal: f32| 1.0 - (value - ideal).abs();
    let saturation = closeness(candidate.saturation, target.saturation.1);
    let lightness = closeness(candidate.lightness, target.lightness.1);
    let population = candidate.population as f32 / max_population as f32;

    (saturation * WEIGHT_SATURATION + lightness * WEIGHT_LIGHTNESS + population * WEIGHT_POPULATION)
        / (WEIGHT_SATURATION + WEIGHT_LIGHTNESS + WEIGHT_POPULATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(color: [u8; 3], count: usize) -> impl Iterator<Item = [u8; 4]> {
        std::iter::repeat_n([color[0], color[1], color[2], 255], count)
    }

    #[test]
    fn ignores_transparent_and_white_pixels() {
        let pixels = solid([255, 255, 255], 50).chain(std::iter::repeat_n([200, 0, 0, 10], 50));
        assert!(quantize(pixels, 16).is_empty());
    }

    #[test]
    fn separates_distinct_colors() {
        let pixels = solid([220, 30, 30], 300)
            .chain(solid([30, 30, 220], 200))
            .chain(solid([40, 40, 40], 100));
        let candidates = quantize(pixels, 8);
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].color, ColorValue::new(220, 30, 30));
        assert_eq!(candidates[0].population, 300);
        assert_eq!(candidates[2].color, ColorValue::new(40, 40, 40));
    }

    #[test]
    fn respects_color_budget() {
        let pixels = (0..=255u8).flat_map(|v| solid([v, 255 - v, v / 2], 3));
        assert!(quantize(pixels, 4).len() <= 4);
    }

    #[test]
    fn quantization_is_deterministic() {
        let build = || {
            (0..2000u32).map(|i| {
                let v = (i * 37 % 256) as u8;
                [v, (i % 256) as u8, 255 - v, 255]
            })
        };
        assert_eq!(quantize(build(), 16), quantize(build(), 16));
    }

    #[test]
    fn classifies_into_expected_bands() {
        let candidates = vec![
            Candidate::new(ColorValue::new(230, 20, 20), 500),
            Candidate::new(ColorValue::new(250, 170, 170), 200),
            Candidate::new(ColorValue::new(90, 10, 10), 150),
            Candidate::new(ColorValue::new(128, 118, 110), 100),
        ];
        let palette = classify(&candidates);
        assert_eq!(
            palette.color(SwatchName::Vibrant),
            Some(ColorValue::new(230, 20, 20))
        );
        assert_eq!(
            palette.color(SwatchName::LightVibrant),
            Some(ColorValue::new(250, 170, 170))
        );
        assert_eq!(
            palette.color(SwatchName::DarkVibrant),
            Some(ColorValue::new(90, 10, 10))
        );
        assert_eq!(
            palette.color(SwatchName::Muted),
            Some(ColorValue::new(128, 118, 110))
        );
        assert_eq!(palette.swatch(SwatchName::Vibrant).population, 500);
    }

    #[test]
    fn candidates_are_used_once() {
        let candidates = vec![Candidate::new(ColorValue::new(230, 20, 20), 10)];
        let palette = classify(&candidates);
        let filled = palette.swatches().filter(|s| s.color.is_some()).count();
        assert_eq!(filled, 1);
    }

    #[test]
    fn no_candidates_yields_empty_palette() {
        assert!(classify(&[]).is_empty());
    }
}
