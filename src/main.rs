use banken::{
    cmd::{self, TestAlertArgs},
    config::{AppConfig, FrameSourceConfig},
    models::StatusReport,
    providers::{ImageDirSource, ReplayDetector, SyntheticSource, VideoSource},
    supervisor::{Supervisor, SupervisorError},
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Directory holding app.yaml. Defaults to `configs`.
    #[arg(long)]
    config_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the monitoring supervisor.
    Run(RunArgs),
    /// Plays a test utterance through the configured alert channel.
    TestAlert(TestAlertArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_monitor(args.config_dir.as_deref()).await?,
        Commands::TestAlert(args) => cmd::test_alert(args).await?,
    }

    Ok(())
}

async fn run_monitor(config_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(config_dir)?;
    tracing::debug!(detections_path = %config.detections_path.display(), "Configuration loaded.");

    // The model is loaded before anything else; a load failure prevents
    // monitoring from starting.
    tracing::debug!("Loading detection model...");
    println!("{}", StatusReport::LoadingModel);
    let detector = ReplayDetector::load(&config.detections_path)
        .map_err(SupervisorError::ModelLoad)
        .inspect_err(|e| eprintln!("{}", StatusReport::Error(e.to_string())))?;
    tracing::info!("Detection model loaded.");

    let frames = config.frames.clone();
    match frames {
        FrameSourceConfig::Synthetic { width, height } => {
            run_supervisor(config, detector, SyntheticSource::new(width, height)).await
        }
        FrameSourceConfig::Directory { path } => {
            run_supervisor(config, detector, ImageDirSource::new(path)).await
        }
    }
}

async fn run_supervisor<V: VideoSource + 'static>(
    config: AppConfig,
    detector: ReplayDetector,
    video_source: V,
) -> Result<(), Box<dyn std::error::Error>> {
    let supervisor = Supervisor::builder()
        .config(config)
        .detector(detector)
        .video_source(video_source)
        .build()?;

    // Wire the control surfaces before the supervisor takes over: stdin
    // lines become configuration commands, and status transitions go to the
    // terminal.
    let commands = supervisor.command_sender();
    let cancellation_token = supervisor.cancellation_token();
    tokio::spawn(cmd::run_console(commands, cancellation_token));

    let mut status_rx = supervisor.status_receiver();
    tokio::spawn(async move {
        while status_rx.changed().await.is_ok() {
            let line = status_rx.borrow_and_update().to_string();
            println!("{}", line);
        }
    });

    supervisor.run().await?;
    Ok(())
}
