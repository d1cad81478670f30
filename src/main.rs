use anyhow::{Context, Result};
use clap::Parser;
use stuffty::{Cli, Config, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut session = Session::new(Config::default());
    session.apply(&cli).await?;

    session.type_args(&cli.strings).await?;

    if let Some(path) = &cli.file {
        session
            .run_script_file(path)
            .await
            .with_context(|| format!("failed to run script '{}'", path.display()))?;
    }

    Ok(())
}
