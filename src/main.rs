//! folio, a themeable portfolio site
use folio::{app::FolioApp, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Some(app) = FolioApp::init()? {
        app.run().await?;
    }

    Ok(())
}
