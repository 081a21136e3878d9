use colored::Colorize;
use pagescope::commands::command_argument_builder;
use pagescope::handlers::{handle_assets, handle_scan, handle_weigh};
use pagescope_core::print_banner;
use tracing::Level;

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let chosen_command = command_argument_builder().get_matches();
    let quiet = chosen_command.get_flag("quiet");

    init_logging(chosen_command.get_flag("verbose"));

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let outcome = match chosen_command.subcommand() {
        Some(("assets", primary_command)) => handle_assets(primary_command, !quiet).await,
        Some(("weigh", primary_command)) => handle_weigh(primary_command, !quiet).await,
        Some(("scan", primary_command)) => handle_scan(primary_command, !quiet).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
