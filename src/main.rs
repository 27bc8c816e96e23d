use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use clickup_mcp::{
    Config,
    cli::{self, AuthCommands, Cli, Commands, ConfigCommands},
    server::{McpServer, ToolRegistry},
};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; the key may come from elsewhere.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = load_config(config_path)?;
            let server = McpServer::new(config.client()?);
            server.serve_stdio().await?;
        }

        Commands::Tools { json } => {
            println!("{}", cli::render_tools(&ToolRegistry::new(), json)?);
        }

        Commands::Call { tool, args } => {
            let config = load_config(config_path)?;
            let client = config.client()?;
            let result =
                cli::call_tool(&client, &ToolRegistry::new(), &tool, args.as_deref()).await?;

            println!("{}", result.to_text());
            if result.is_error {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let config = load_config(config_path)?;
                print!("{}", config.to_redacted_toml()?);
                match config.api_key() {
                    Some((key, source)) => {
                        println!("\n# API key: {} (from {source})", clickup_mcp::config::redact(&key));
                    }
                    None => println!("\n# API key: not configured"),
                }
            }
            ConfigCommands::Path => {
                let path = match config_path {
                    Some(path) => path.to_path_buf(),
                    None => Config::config_path()?,
                };
                println!("{}", path.display());
            }
        },

        Commands::Auth { command } => match command {
            AuthCommands::Login(args) => cli::auth::auth_login(args)?,
            AuthCommands::Logout => cli::auth::auth_logout()?,
        },
    }

    Ok(ExitCode::SUCCESS)
}
