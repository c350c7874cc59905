use clap::Parser;
use logview::core::{config::Config, QueryForm};
use logview::fetch::HttpLogSource;
use logview::headless::{self, HeadlessOptions, OutputFormat};
use std::process::ExitCode;

const DEBUG_LOG: &str = "/tmp/logview-debug.log";

#[derive(Parser)]
#[command(name = "logview", about = "Fetch remote log files and page through them by severity")]
struct Cli {
    /// Write debug logs to /tmp/logview-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Server address (dotted quad). Defaults to [server].host.
    #[arg(long)]
    host: Option<String>,

    /// Server port. Defaults to [server].port.
    #[arg(long)]
    port: Option<String>,

    /// Log file to fetch, e.g. app.log.
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    /// Only lines containing this keyword.
    #[arg(short = 'k', long)]
    keyword: Option<String>,

    /// Number of lines to request. Defaults to [fetch].default_lines.
    #[arg(short = 'n', long)]
    lines: Option<String>,

    /// Stream filter. Defaults to [fetch].stream.
    #[arg(long)]
    stream: Option<String>,

    /// Lines per page. Defaults to [ui].page_size.
    #[arg(long)]
    page_size: Option<usize>,

    /// Print one page to stdout and exit instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Page to print in headless mode.
    #[arg(long, default_value_t = 1, requires = "headless")]
    page: usize,

    /// Output format in headless mode.
    #[arg(long, value_enum, default_value_t = OutputFormat::Raw, requires = "headless")]
    format: OutputFormat,
}

impl Cli {
    /// The form as the user would have typed it: flags first, config second.
    fn form(&self, config: &Config) -> QueryForm {
        QueryForm {
            host: self.host.clone().unwrap_or_else(|| config.server.host.clone()),
            port: self.port.clone().unwrap_or_else(|| config.server.port.to_string()),
            filename: self.file.clone().unwrap_or_default(),
            keyword: self.keyword.clone().unwrap_or_default(),
            lines: self.lines.clone().unwrap_or_default(),
            stream: self.stream.clone().unwrap_or_else(|| config.fetch.stream.clone()),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("logview debug log started — tail -f {DEBUG_LOG}");
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config: falling back to defaults");
        Config::defaults()
    });
    if let Some(page_size) = cli.page_size {
        config.ui.page_size = page_size;
    }
    let form = cli.form(&config);

    if !cli.headless {
        logview::tui::run(config, form)?;
        return Ok(ExitCode::SUCCESS);
    }

    let opts = HeadlessOptions {
        form,
        limits: config.fetch.limits(),
        page_size: config.ui.page_size,
        page: cli.page,
        format: cli.format,
    };
    let source = HttpLogSource::new().with_timeout(config.fetch.request_timeout());
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(headless::run(
        &source,
        &opts,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr(),
    ));

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("{err}");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
