use paydesk_console::{init_tracing, run, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(config.log_format);
    run(config).await
}
