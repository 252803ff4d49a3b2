//! Helper tool previewing the theme derived from a logo

#[cfg(feature = "tool-theme-preview")]
mod theme_preview;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(feature = "tool-theme-preview")]
    {
        theme_preview::run().await?;
    }
    Ok(())
}
