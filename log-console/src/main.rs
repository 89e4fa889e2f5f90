use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use log_console::commands::{compose_commands, log_commands, view_commands};
use log_console::console::Console;
use log_console::services::{ConfigOverrides, ConfigService};
use log_console::state::AppState;
use log_console::utils::logger;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal console for a remote log ingestion server.", long_about = None)]
struct Cli {
    /// Base URL of the log server, e.g. http://localhost:8080
    /// [default: $LOG_CONSOLE_API_URL, then $NEXT_PUBLIC_API_URL]
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Directory for the console's own JSON log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// 命令行覆盖项; 环境变量统一由 ConfigService 读取
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout,
            log_dir: self.log_dir.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the log list.
    List {
        /// Only show one level (info, warn, error, debug) or "all".
        #[arg(short, long, default_value = "all")]
        level: String,

        /// Show the fields of the n-th visible entry (starting at 1).
        #[arg(short, long)]
        expand: Option<usize>,
    },
    /// Ask the server to generate sample logs, then print the refreshed list.
    Generate,
    /// Send one custom log entry.
    Send {
        #[arg(short, long)]
        message: String,

        #[arg(short, long, default_value = "info")]
        level: String,

        /// Extra field as key=value; repeatable. Numeric values are sent as numbers.
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },
    /// Print the server health check.
    Status,
    /// Interactive console (default).
    Console,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ConfigService::load(cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("log-console: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // guard 必须存活到进程退出
    let _log_guard = match logger::init(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("log-console: file logging disabled ({})", e);
            None
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_base_url = %config.api_base_url,
        "log-console starting"
    );

    let state = match AppState::new(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            eprintln!("log-console: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command.unwrap_or(Command::Console), state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("log-console: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, state: Arc<AppState>) -> Result<(), String> {
    match command {
        Command::List { level, expand } => {
            view_commands::set_filter(&state, &level).await?;
            let fetched = log_commands::fetch_logs(&state).await;
            if let Some(n) = expand {
                if n == 0 || !view_commands::toggle_expand(&state, n - 1).await {
                    tracing::debug!(n, "Nothing to expand");
                }
            }
            print!("{}", view_commands::render_logs(&state).await);
            fetched.map(|_| ())
        }
        Command::Generate => {
            let result = log_commands::generate_logs(&state).await;
            print!("{}", view_commands::render_logs(&state).await);
            result.map(|_| ())
        }
        Command::Send {
            message,
            level,
            fields,
        } => {
            compose_commands::toggle_compose_form(&state).await;
            compose_commands::set_compose_message(&state, &message).await?;
            compose_commands::set_compose_level(&state, &level).await?;
            for (position, raw) in fields.iter().enumerate() {
                let (key, value) = raw
                    .split_once('=')
                    .ok_or_else(|| format!("Field `{}` must look like key=value", raw))?;
                compose_commands::add_field(&state).await?;
                compose_commands::update_field(&state, position, key, value).await?;
            }
            compose_commands::submit_custom_log(&state).await?;
            println!("Log sent.");
            Ok(())
        }
        Command::Status => {
            let status = log_commands::server_status(&state).await?;
            println!("Server: {}", status.message);
            if let Some(version) = status.version {
                println!("Version: {}", version);
            }
            if let Some(time) = status.time {
                println!("Time: {}", time);
            }
            Ok(())
        }
        Command::Console => {
            let console = Console::new(state);
            let stdin = BufReader::new(tokio::io::stdin());
            console
                .run(stdin, tokio::io::stdout())
                .await
                .map_err(|e| format!("console I/O error: {}", e))
        }
    }
}
