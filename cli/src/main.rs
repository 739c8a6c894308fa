use clap::{Parser, Subcommand};
use inferno_cli::commands;
use inferno_cli::logging;
use inferno_cli::readline;
use inferno_cli::CliContext;
use std::io::Write;

fn main() -> Result<(), String> {
    logging::init();
    let mut ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Replay Inferno scripts through the assistant engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a replay script and start a fresh run
    Load {
        #[arg(short, long)]
        path: String,
    },
    /// Replay the next tick(s)
    Step {
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },
    /// Replay the rest of the script
    Run,
    /// Print the safe-tile map around the player
    Map,
    Status {
        #[arg(long)]
        json: bool,
    },
    Config {
        #[arg(short, long)]
        path: Option<String>,
    },
    SaveConfig,
    Exit,
}

fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "inferno".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    let result = match &cli.command {
        Some(Commands::Load { path }) => commands::load(path, ctx),
        Some(Commands::Step { count }) => commands::step(*count, ctx),
        Some(Commands::Run) => commands::run(ctx),
        Some(Commands::Map) => commands::map(ctx),
        Some(Commands::Status { json }) => commands::status(*json, ctx),
        Some(Commands::Config { path }) => commands::show_settings(path.as_deref(), ctx),
        Some(Commands::SaveConfig) => commands::save_settings(ctx),
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => Ok(()),
    };
    result.map_err(|e| e.to_string())?;
    Ok(false)
}
