use std::time::Duration;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use spotlog::{cli, config, error, spotify::auth::PollOptions, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in and export listening data interactively (default)
    Run(RunArgs),

    /// Print the Spotify authorization URL
    Url,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct RunArgs {
    /// Seconds between checks while waiting for the login callback
    #[clap(long)]
    pub poll_interval: Option<u64>,

    /// Give up waiting for the login after this many seconds
    #[clap(long)]
    pub max_wait: Option<u64>,

    /// Do not open the authorization URL in a browser
    #[clap(long)]
    pub no_browser: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPOTLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_options(args: &RunArgs, config: &config::Config) -> cli::RunOptions {
    let mut poll = PollOptions::from_config(config);
    if let Some(secs) = args.poll_interval.filter(|s| *s > 0) {
        poll.interval = Duration::from_secs(secs);
    }
    if let Some(secs) = args.max_wait.filter(|s| *s > 0) {
        poll.max_wait = Some(Duration::from_secs(secs));
    }

    cli::RunOptions {
        poll,
        open_browser: !args.no_browser,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Some(Command::Completions(opt)) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let config = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };

    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => {
            if let Err(e) = cli::run(&config, run_options(&args, &config)).await {
                error!("{}", e);
            }
        }
        Command::Url => cli::print_auth_url(&config),
        Command::Completions(_) => {}
    }
}
