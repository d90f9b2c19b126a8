use anyhow::Result;
use env_logger::Env;
use scpi_interpreter::config::Config;
use scpi_interpreter::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    serve(config).await
}
