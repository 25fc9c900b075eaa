use clap::Parser;
use satfetch::{
    app,
    config::{Cli, Config},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    // トークンの確認は入力を読むより先に行う
    let config = Config::try_from(Cli::parse())?;

    let summary = app::run(config).await?;
    info!(
        total = summary.total,
        skipped = summary.skipped,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "すべてのレコードを処理しました"
    );
    Ok(())
}
