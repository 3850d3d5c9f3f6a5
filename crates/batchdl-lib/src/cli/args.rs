use clap::{ArgAction, Parser};
use tracing::Level;

#[derive(Debug, Clone)]
pub enum Command {
    Download {
        config_path: Option<String>,
        threads: Option<usize>,
        dest_dir: Option<String>,
        request_timeout_secs: Option<u64>,
        urls: Vec<String>,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "batchdl",
    version,
    about = "Download a batch of URLs into a directory, a bounded number at a time"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file with defaults and a list of downloads"
    )]
    config: Option<String>,

    #[arg(
        short = 't',
        long = "threads",
        value_name = "N",
        help = "Maximum number of simultaneous downloads [default: 3]"
    )]
    threads: Option<usize>,

    #[arg(
        short = 'd',
        long = "dest-dir",
        value_name = "DIR",
        help = "Directory to save all downloads [default: .]"
    )]
    dest_dir: Option<String>,

    #[arg(
        long = "request-timeout-secs",
        value_name = "SECS",
        help = "Abort a single request after this many seconds (no limit by default)"
    )]
    request_timeout_secs: Option<u64>,

    #[arg(
        value_name = "URL",
        help = "URLs to download; each is saved under its last path segment"
    )]
    urls: Vec<String>,
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy()
                .add_directive("hyper_util=warn".parse().unwrap()),
        )
        .init();

    Args {
        command: cli.into_command(),
        log_level,
    }
}

impl Cli {
    fn into_command(self) -> Command {
        Command::Download {
            config_path: self.config,
            threads: self.threads,
            dest_dir: self.dest_dir,
            request_timeout_secs: self.request_timeout_secs,
            urls: self.urls,
        }
    }
}
