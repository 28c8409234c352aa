use eyre::{Result, bail};
use log::{LevelFilter, debug, info};

mod cli;

use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use ytsum::config::Config;
use ytsum::pipeline::Pipeline;

fn setup_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_module("ytsum", LevelFilter::Debug);
    }
    builder.init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // `.env` may carry RUST_LOG, so it has to be in the environment before logging starts
    let dotenv = ytsum::config::load_dotenv();
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env loaded: {e}"),
    }

    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Serve { port: None, host: None }) {
        Command::Serve { port, host } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            debug!("Resolved config: host={} port={} model={}", config.host, config.port, config.gemini_model);

            let pipeline = Pipeline::new(config)?;
            ytsum::server::serve(pipeline).await
        }
        Command::Summarize {
            url,
            lang,
            format,
            output,
        } => {
            let pipeline = Pipeline::new(config)?;
            let request = ytsum::SummarizeRequest::new(url, lang);

            let response = match pipeline.run(&request).await {
                Ok(response) => response,
                Err(e) => bail!("{e}"),
            };

            let rendered = match format {
                OutputFormat::Text => ytsum::output::render_text(&response),
                OutputFormat::Json => ytsum::output::render_json(&response)?,
            };

            if let Some(ref path) = output {
                std::fs::write(path, &rendered)?;
                info!("Output written to: {}", path.display());
            } else {
                println!("{rendered}");
            }
            Ok(())
        }
    }
}
