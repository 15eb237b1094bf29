use std::io::Read;
use std::sync::Arc;

use anyhow::Context;

use mailgauge::config::Config;
use mailgauge::pipeline::Pipeline;
use mailgauge::sink::HttpMetricSink;
use mailgauge::store::HttpMailStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env();

    eprintln!("📬 mailgauge v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Site: {}", config.site_id);
    eprintln!(
        "   Metric: {} ({}={})",
        config.metric_name, config.dimension_name, config.dimension_value
    );
    eprintln!("   Store: {}", config.store_url);
    eprintln!("   Sink: {}\n", config.sink_url);

    // Event JSON from the first argument (a file path) or stdin.
    let raw_event = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading event file {path}"))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading event from stdin")?;
            buffer
        }
    };

    let store = Arc::new(HttpMailStore::new(config.store_url.clone()));
    let sink = Arc::new(HttpMetricSink::new(
        config.sink_url.clone(),
        config.metric_name.clone(),
        config.dimension_name.clone(),
        config.dimension_value.clone(),
    ));

    let pipeline = Pipeline::new(store, sink, config);
    let result = pipeline.classify(&raw_event).await?;

    println!("{result}");
    Ok(())
}
