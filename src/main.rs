use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use jaundice::config::{AnalyzerConfig, ConfigLoader};
use jaundice::metrics::MetricsSnapshot;
use jaundice::server::{self, AppState};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use validator::Validate;

#[derive(Parser)]
#[command(name = "jaundice")]
#[command(version)]
#[command(about = "Scores news articles by their share of emotionally charged words", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a fixed list of articles and print the results
    Run {
        /// Path to the configuration file (JSON/YAML/TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show a progress bar (stderr)
        #[arg(short, long, default_value_t = false)]
        progress: bool,

        /// Article URLs; replaces the list from the config file
        urls: Vec<String>,
    },
    /// Serve `GET /?urls=...` over HTTP
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to listen on; overrides the config file
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate a configuration file
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AnalyzerConfig> {
    match path {
        Some(path) => {
            log::info!("Loading config from {:?}", path);
            Ok(ConfigLoader::load(path)?)
        }
        None => {
            let config = AnalyzerConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "info"); }
    }
    let cli = Cli::parse();
    let logger = env_logger::Builder::from_default_env().build();
    let level = logger.filter();
    let multi = Arc::new(indicatif::MultiProgress::new());

    match cli.command {
        Commands::Run { config, progress, urls } => {
            if progress {
                indicatif_log_bridge::LogWrapper::new((*multi).clone(), logger).try_init()?;
            } else {
                log::set_boxed_logger(Box::new(logger))?;
            }
            log::set_max_level(level);

            let mut config_data = load_config(config.as_ref())?;
            if !urls.is_empty() {
                config_data.urls = urls;
            }
            if config_data.urls.is_empty() {
                anyhow::bail!("no article urls given on the command line or in the config");
            }

            let coordinator = ConfigLoader::create_coordinator(&config_data, None)?;
            let mut output = ConfigLoader::create_output(
                &config_data,
                progress.then(|| multi.clone()),
            );

            let mut progress_bar: Option<ProgressBar> = None;
            let mut progress_task = None;
            if progress {
                let pb = multi.add(ProgressBar::new(config_data.urls.len() as u64));
                pb.set_style(ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"));

                let mut metrics_rx = coordinator.watch_metrics();
                let pb_clone = pb.clone();
                progress_bar = Some(pb);
                progress_task = Some(tokio::spawn(async move {
                    while metrics_rx.changed().await.is_ok() {
                        let snapshot: MetricsSnapshot = metrics_rx.borrow().clone();
                        pb_clone.set_position(snapshot.articles_processed);
                        pb_clone.set_message(format!(
                            "OK: {} | Fetch errors: {} | Parsing errors: {} | Timeouts: {}",
                            snapshot.articles_ok,
                            snapshot.fetch_errors,
                            snapshot.parsing_errors,
                            snapshot.timeouts
                        ));
                    }
                }));
            }

            log::info!("Scoring {} articles...", config_data.urls.len());
            let results = tokio::select! {
                results = coordinator.run(&config_data.urls) => results,
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Interrupted, abandoning batch");
                    return Ok(());
                }
            };

            if let Some(task) = progress_task {
                task.abort();
            }
            let final_metrics = coordinator.get_metrics();
            if let Some(pb) = progress_bar {
                pb.set_position(final_metrics.articles_processed);
                pb.finish_with_message(format!(
                    "Success: {:.1}% - Completed",
                    final_metrics.success_rate
                ));
            }

            for result in &results {
                output.write(result).await?;
            }
            output.close().await?;

            log::info!(
                "Scored {} articles in {:.1}s (avg {}ms per article)",
                final_metrics.articles_processed,
                final_metrics.elapsed_seconds,
                final_metrics.avg_duration_ms
            );
        }
        Commands::Serve { config, port } => {
            log::set_boxed_logger(Box::new(logger))?;
            log::set_max_level(level);

            let mut config_data = load_config(config.as_ref())?;
            if let Some(port) = port {
                config_data.server.port = port;
            }

            let host: IpAddr = config_data.server.host.parse().map_err(|e| {
                anyhow::anyhow!("invalid server host {:?}: {}", config_data.server.host, e)
            })?;
            let coordinator = Arc::new(ConfigLoader::create_coordinator(&config_data, None)?);
            let state = AppState::new(coordinator, config_data.server.max_urls);

            let listener = server::bind(SocketAddr::new(host, config_data.server.port)).await?;
            server::serve(listener, state).await?;
        }
        Commands::Check { config } => {
            match ConfigLoader::load(&config) {
                Ok(cfg) => {
                    println!("✅ Config is valid:");
                    println!("   Name: {}", cfg.name);
                    println!("   Charged dictionaries: {:?}", cfg.charged_dicts);
                    println!("   Morphology dictionary: {:?}", cfg.morph_dictionary);
                    println!("   URLs: {}", cfg.urls.len());
                    println!("   Timeout: {}s", cfg.timeout_secs);
                    println!(
                        "   Server: {}:{} (max {} urls per request)",
                        cfg.server.host, cfg.server.port, cfg.server.max_urls
                    );
                }
                Err(e) => {
                    eprintln!("❌ Config error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
