#![forbid(unsafe_code)]

use adaptive_theme_back::theme::ThemeVariableSet;
use anyhow::Result;
use std::{fs::File, io::BufWriter, path::PathBuf};

/// Serialize the published variable set to a JSON file.
pub fn save_theme_json(
    path: impl AsRef<std::path::Path>,
    variables: &ThemeVariableSet,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let f = File::create(path)?;
    let w = BufWriter::new(f);
    serde_json::to_writer_pretty(w, variables)?;
    Ok(path.to_path_buf())
}
