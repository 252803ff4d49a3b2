//! Helper tool previewing the theme derived from a logo

#![forbid(unsafe_code)]

mod html;
mod json_io;

use adaptive_theme_back::{
    extractor::{ExtractorConfig, ImageExtractor, PaletteExtractor},
    theme::{ContrastEnforcer, ThemeBuilder},
};
use anyhow::{Context, Result, bail};
use html::write_html_grid;
use json_io::save_theme_json;
use std::{env, fs, path::PathBuf};

const GRID_COLS: usize = 3;

pub async fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let Some(logo) = args.next() else {
        bail!("usage: tool-theme-preview <logo path or URL> [min ratio]");
    };
    let min_ratio = args
        .next()
        .map(|value| value.parse::<f64>())
        .transpose()
        .context("min ratio must be a number")?;

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("target"));
    let out_dir = target_dir.join("tool-theme-preview");
    fs::create_dir_all(&out_dir)?;

    let extractor = ImageExtractor::new(ExtractorConfig::default())?;
    let palette = extractor
        .extract(&logo)
        .await
        .with_context(|| format!("extracting palette from {logo}"))?;

    let enforcer = min_ratio.map(ContrastEnforcer::new).unwrap_or_default();
    let builder = ThemeBuilder::new(enforcer);
    let assignment = builder.assign(&palette);
    let variables = builder.build(&palette);

    let html_path = write_html_grid(
        &format!("Theme preview for {logo} (min ratio {})", enforcer.min_ratio()),
        GRID_COLS,
        &palette,
        &assignment,
        out_dir.join("theme_preview.html"),
    )?;
    let json_path = save_theme_json(out_dir.join("theme_variables.json"), &variables)?;

    println!(
        "Generated theme preview in {}:\n  - {}\n  - {}",
        out_dir.display(),
        html_path.display(),
        json_path.display()
    );

    Ok(())
}
