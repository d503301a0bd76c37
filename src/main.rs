use anyhow::Result;
use hcdnorm::pipeline;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) run the pipeline from the current directory ──────────────
    let summary = pipeline::run(".")?;

    // ─── 3) human-readable summary ───────────────────────────────────
    println!("OK: normalized");
    for (table, rows) in &summary.tables {
        println!(" {}: {} rows", table, rows);
    }
    Ok(())
}
