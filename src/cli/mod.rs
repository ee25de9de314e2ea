mod apps;

use anyhow::Result;
use console::style;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::core::history;
use crate::core::terminal::{self, GuideSection, print_error};

fn print_help() {
    terminal::print_banner();

    GuideSection::new("Commands")
        .command("apps", "List Spark applications and summarize their attempts")
        .command("version", "Show the sparkhist version")
        .command("help", "Show this help message")
        .print();

    GuideSection::new("apps flags")
        .text("--completed, -c    Print the completed-applications listing as raw JSON")
        .text("--running, -r      Print the running-applications listing as raw JSON")
        .text(&format!(
            "--api-url <url>    History server API root (default: {})",
            history::DEFAULT_API_URL
        ))
        .blank()
        .text("Filter flags are presence-only; when both are given, --completed wins.")
        .print();

    println!(
        "\n {} {} <command> [flags]\n",
        style("Usage:").bold(),
        style("sparkhist").green()
    );
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct AppsArgs {
    pub completed: bool,
    pub running: bool,
    pub api_url: Option<String>,
}

pub(crate) fn parse_apps_flags(args: &[String], start: usize) -> AppsArgs {
    let mut parsed = AppsArgs::default();
    let mut i = start;
    while i < args.len() {
        match args[i].as_str() {
            "--completed" | "-c" => {
                parsed.completed = true;
                i += 1;
            }
            "--running" | "-r" => {
                parsed.running = true;
                i += 1;
            }
            "--api-url" => {
                if i + 1 < args.len() {
                    parsed.api_url = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    parsed
}

pub async fn run_main() -> Result<()> {
    // Log lines go to stderr so stdout stays clean for listings.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let args: Vec<String> = std::env::args().collect();
    if args.len() <= 1 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "apps" => {
            let parsed = parse_apps_flags(&args, 2);
            apps::run_apps_command(parsed).await
        }
        "version" | "--version" | "-V" => {
            println!("sparkhist {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        cmd => {
            print_error(&format!("Unknown command: {}", cmd));
            print_help();
            Ok(())
        }
    }
}
