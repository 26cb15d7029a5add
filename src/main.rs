use clap::Parser;
use roster_regions::cli::Args;
use roster_regions::{Config, LoadState, RegionService, TerminalRenderer};
use std::error::Error;
use std::io::{self, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("Commands:");
    println!("  load    - Load tonight's players (uses cached data when fresh)");
    println!("  refresh - Reload everything, ignoring the cache");
    println!("  retry   - Try again after a failed load");
    println!("  status  - Show the state of the last load");
    println!("  exit    - Exit the program");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_directive = if args.debug {
        "roster_regions=debug"
    } else {
        "roster_regions=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();

    let config = args.apply(Config::load()?)?;
    info!("Starting roster regions for season {}", config.season);
    debug!("Configuration: {:?}", config);

    let mut service = RegionService::new(config)?;
    let mut renderer = TerminalRenderer::new();

    let state = service.load(&mut renderer, false).await;
    if args.once {
        return match state {
            LoadState::Error(message) => Err(message.clone().into()),
            _ => Ok(()),
        };
    }

    println!("=== NHL Players by Birth Region ===");
    print_help();

    let mut input = String::new();
    loop {
        input.clear();
        print!("> ");
        io::stdout().flush()?;
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let command = input.trim();
        match command {
            "exit" | "quit" => {
                debug!("Received exit command");
                break;
            }
            "load" => {
                service.load(&mut renderer, false).await;
            }
            "refresh" => {
                service.refresh(&mut renderer).await;
            }
            "retry" => {
                if !matches!(service.state(), LoadState::Error(_)) {
                    println!("Nothing to retry; the last load did not fail.");
                } else {
                    service.retry(&mut renderer).await;
                }
            }
            "status" => println!("Last load: {}", service.state().name()),
            "help" | "" => print_help(),
            other => {
                println!("Unknown command: {}", other);
                print_help();
            }
        }
    }

    info!("Shutting down");
    Ok(())
}
