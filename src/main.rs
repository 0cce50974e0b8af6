//! stagecommit - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stagecommit::config::{BackendConfig, CliOptions, Config};
use stagecommit::{GeminiBackend, GitCli, HttpBackend, MessageGenerator, Outcome, TerminalPrompter, WorkflowError};

/// Generate a commit message for the staged changes, commit, and push.
#[derive(Parser, Debug)]
#[command(name = "stagecommit")]
#[command(about = "Generate a commit message for staged changes, commit, and push")]
#[command(version)]
struct Cli {
    /// Generation backend: http or gemini [env: STAGECOMMIT_BACKEND]
    #[arg(long)]
    backend: Option<String>,

    /// HTTP backend URL [env: STAGECOMMIT_URL]
    #[arg(long)]
    url: Option<String>,

    /// Gemini model name [env: STAGECOMMIT_MODEL]
    #[arg(long)]
    model: Option<String>,

    /// Run as if started in this directory
    #[arg(short = 'C', value_name = "DIR")]
    workdir: Option<PathBuf>,

    /// Remote to push to
    #[arg(long)]
    remote: Option<String>,

    /// Send the diff unfiltered (keep binary and asset files)
    #[arg(long)]
    no_filter: bool,

    /// Extra file extension to leave out of the diff (repeatable)
    #[arg(long = "deny-ext", value_name = "EXT")]
    deny_ext: Vec<String>,

    /// Print the generated message without committing
    #[arg(long)]
    dry_run: bool,

    /// Print the diff sent to the backend
    #[arg(long)]
    show_diff: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for CliOptions {
    fn from(cli: Cli) -> Self {
        CliOptions {
            backend: cli.backend,
            url: cli.url,
            model: cli.model,
            workdir: cli.workdir,
            remote: cli.remote,
            no_filter: cli.no_filter,
            deny_ext: cli.deny_ext,
            dry_run: cli.dry_run,
            show_diff: cli.show_diff,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match try_main(cli).await {
        Ok(outcome) => {
            tracing::debug!(?outcome, "run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn try_main(cli: Cli) -> Result<Outcome> {
    // Validate configuration before touching git or the network
    let config = Config::from_env(cli.into())?;
    let client = config.http_client()?;

    // The backend is fixed here; the workflow is monomorphized over it.
    let outcome = match &config.backend {
        BackendConfig::Http { url } => {
            execute(&config, HttpBackend::new(client, url.as_str())).await?
        }
        BackendConfig::Gemini {
            base_url,
            model,
            api_key,
        } => {
            let backend = GeminiBackend::new(client, base_url.as_str(), model.as_str(), api_key.as_str());
            execute(&config, backend).await?
        }
    };

    Ok(outcome)
}

async fn execute<G: MessageGenerator>(config: &Config, generator: G) -> Result<Outcome, WorkflowError> {
    let vcs = GitCli::new(&config.workdir);
    let mut prompter = TerminalPrompter;
    stagecommit::run(&vcs, &generator, &mut prompter, config).await
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
