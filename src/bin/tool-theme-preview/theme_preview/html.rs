#![forbid(unsafe_code)]

use adaptive_theme_back::theme::{Palette, Role, RoleAssignment};
use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};

pub fn write_html_grid(
    title: &str,
    cols: usize,
    palette: &Palette,
    assignment: &RoleAssignment,
    path: impl AsRef<std::path::Path>,
) -> Result<std::path::PathBuf> {
    let path = path.as_ref();
    let f = File::create(path)?;
    let mut w = BufWriter::new(f);
    writeln!(
        w,
        r#"<!doctype html><meta charset="utf-8">
<style>
  body{{margin:0;background:#111;color:#eee;font-family:system-ui}}
  h2,h3{{margin:12px}}
  .g{{display:grid;grid-template-columns:repeat({cols},1fr);gap:6px;padding:8px}}
  .s{{aspect-ratio:3/1;border-radius:10px;display:flex;flex-direction:column;align-items:center;
      justify-content:center;font-weight:700}}
  .empty{{border:2px dashed #444;color:#777}}
</style>
<h2>{title}</h2>
<h3>Swatches</h3>
<div class="g">"#
    )?;
    for swatch in palette.swatches() {
        match swatch.color {
            Some(color) => writeln!(
                w,
                r#"<div class="s" style="background:{hex};color:{fg}">{name}<small>{hex} · {population}px</small></div>"#,
                hex = color.to_hex(),
                fg = if color.is_dark() { "#FFFFFF" } else { "#111111" },
                name = swatch.name,
                population = swatch.population,
            )?,
            None => writeln!(w, r#"<div class="s empty">{} (absent)</div>"#, swatch.name)?,
        }
    }
    writeln!(w, "</div>\n<h3>Roles</h3>\n<div class=\"g\">")?;
    for role in Role::ALL {
        let pair = assignment.pair(role);
        writeln!(
            w,
            r#"<div class="s" style="background:{bg};color:{fg}">{name}<small>{bg} / {fg} · {ratio:.2}:1</small></div>"#,
            bg = pair.background.to_hex(),
            fg = pair.foreground.to_hex(),
            name = role.name(),
            ratio = pair.foreground.contrast_ratio(&pair.background),
        )?;
    }
    writeln!(w, "</div>")?;
    Ok(path.to_path_buf())
}
