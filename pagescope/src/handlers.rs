use crate::prompt::Prompter;
use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;
use pagescope_core::config::{
    AssetScanConfig, OutputChoice, OutputTarget, PageSource, PageWeighConfig, StringScanConfig,
    parse_search_strings, parse_sitemap_url, parse_threshold, parse_timeout, parse_url_list,
};
use pagescope_core::report::{
    ReportKind, asset_table_header, format_asset_row, format_page_weight_row,
    format_string_check_row, generate_asset_csv, generate_page_weight_csv,
    generate_string_scan_csv, page_weight_table_header, string_scan_table_header,
    write_csv_report,
};
use pagescope_core::run::{AssetRecordCallback, PageWeightCallback, StringCheckCallback};
use pagescope_core::{execute_asset_scan, execute_page_weigh, execute_string_scan};
use pagescope_scanner::result::{AssetRecord, PageWeight, StringCheck};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The page list a subcommand falls back to prompting for.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PromptFor {
    UrlList,
    Sitemap,
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_summary(title: &str, summary: &str) {
    println!();
    print_divider();
    println!("{}", format!("  {}", title).bright_white().bold());
    print_divider();
    for line in summary.lines() {
        println!("{} {}", "→".blue(), line);
    }
    println!();
}

fn print_saved(path: &Path) {
    println!(
        "{} Results saved to {}",
        "✓".green().bold(),
        path.display().to_string().bright_white()
    );
}

fn print_exit() {
    println!("Exiting.");
}

// ============================================================================
// Config collection (flags first, prompts for anything missing)
// ============================================================================

fn output_choice<R: BufRead, W: Write>(
    args: &ArgMatches,
    prompter: &mut Prompter<R, W>,
) -> Result<OutputChoice> {
    match args.get_one::<String>("output").map(String::as_str) {
        Some("console") => Ok(OutputChoice::Console),
        Some("file") => Ok(OutputChoice::File),
        _ => Ok(prompter.ask_output_choice()?),
    }
}

/// Expand `~` in the output directory.
pub fn expand_output_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

fn output_target(choice: OutputChoice, args: &ArgMatches) -> OutputTarget {
    match choice {
        OutputChoice::File => {
            let dir = args
                .get_one::<String>("output-dir")
                .map(String::as_str)
                .unwrap_or(pagescope_core::config::DEFAULT_OUTPUT_DIR);
            OutputTarget::File(expand_output_dir(dir))
        }
        _ => OutputTarget::Console,
    }
}

fn timeout_secs(args: &ArgMatches) -> Result<u64> {
    match args.get_one::<String>("timeout") {
        Some(raw) => Ok(parse_timeout(raw)?),
        None => Ok(pagescope_core::config::DEFAULT_TIMEOUT_SECS),
    }
}

fn page_source<R: BufRead, W: Write>(
    args: &ArgMatches,
    prompter: &mut Prompter<R, W>,
    prompt_for: PromptFor,
) -> Result<Option<PageSource>> {
    if let Some(raw) = args.get_one::<String>("urls") {
        return Ok(Some(PageSource::Urls(parse_url_list(raw)?)));
    }
    if let Some(raw) = args.get_one::<String>("sitemap") {
        return Ok(Some(PageSource::Sitemap(parse_sitemap_url(raw)?)));
    }

    let source = match prompt_for {
        PromptFor::UrlList => prompter.ask_url_list()?.map(PageSource::Urls),
        PromptFor::Sitemap => prompter.ask_sitemap_url()?.map(PageSource::Sitemap),
    };
    Ok(source)
}

/// Build an asset scan config. `Ok(None)` means the operator chose to exit.
pub fn collect_asset_config<R: BufRead, W: Write>(
    args: &ArgMatches,
    prompter: &mut Prompter<R, W>,
    show_progress: bool,
) -> Result<Option<AssetScanConfig>> {
    let timeout_secs = timeout_secs(args)?;
    let choice = output_choice(args, prompter)?;
    if choice == OutputChoice::Exit {
        return Ok(None);
    }

    let Some(source) = page_source(args, prompter, PromptFor::UrlList)? else {
        return Ok(None);
    };

    let threshold_kb = match args.get_one::<String>("threshold") {
        Some(raw) => parse_threshold(raw)?,
        None => match prompter.ask_threshold()? {
            Some(threshold) => threshold,
            None => return Ok(None),
        },
    };

    Ok(Some(AssetScanConfig {
        source,
        threshold_kb,
        output: output_target(choice, args),
        timeout_secs,
        show_progress,
    }))
}

/// Build a page weigh config. `Ok(None)` means the operator chose to exit.
pub fn collect_weigh_config<R: BufRead, W: Write>(
    args: &ArgMatches,
    prompter: &mut Prompter<R, W>,
    show_progress: bool,
) -> Result<Option<PageWeighConfig>> {
    let timeout_secs = timeout_secs(args)?;
    let choice = output_choice(args, prompter)?;
    if choice == OutputChoice::Exit {
        return Ok(None);
    }

    let Some(source) = page_source(args, prompter, PromptFor::Sitemap)? else {
        return Ok(None);
    };

    Ok(Some(PageWeighConfig {
        source,
        output: output_target(choice, args),
        timeout_secs,
        show_progress,
    }))
}

/// Build a string scan config. `Ok(None)` means the operator chose to exit.
pub fn collect_scan_config<R: BufRead, W: Write>(
    args: &ArgMatches,
    prompter: &mut Prompter<R, W>,
    show_progress: bool,
) -> Result<Option<StringScanConfig>> {
    let timeout_secs = timeout_secs(args)?;
    let choice = output_choice(args, prompter)?;
    if choice == OutputChoice::Exit {
        return Ok(None);
    }

    let Some(source) = page_source(args, prompter, PromptFor::Sitemap)? else {
        return Ok(None);
    };

    let search_strings = match args.get_one::<String>("search") {
        Some(raw) => parse_search_strings(raw)?,
        None => match prompter.ask_search_strings()? {
            Some(strings) => strings,
            None => return Ok(None),
        },
    };

    Ok(Some(StringScanConfig {
        source,
        search_strings,
        output: output_target(choice, args),
        timeout_secs,
        show_progress,
    }))
}

// ============================================================================
// Runs
// ============================================================================

pub async fn run_assets(config: AssetScanConfig) -> Result<()> {
    let on_record: Option<AssetRecordCallback> = match config.output {
        OutputTarget::Console => {
            println!("{}", asset_table_header());
            Some(Arc::new(|record: &AssetRecord| {
                println!("{}", format_asset_row(record));
            }))
        }
        OutputTarget::File(_) => None,
    };

    let report = execute_asset_scan(&config, on_record).await?;

    if let OutputTarget::File(ref dir) = config.output {
        let path = write_csv_report(dir, ReportKind::LargeAssets, &generate_asset_csv(&report))?;
        print_saved(&path);
    }
    print_summary("ASSET SCAN COMPLETE", &report.summary());
    Ok(())
}

pub async fn run_weigh(config: PageWeighConfig) -> Result<()> {
    let on_page: Option<PageWeightCallback> = match config.output {
        OutputTarget::Console => {
            println!("{}", page_weight_table_header());
            Some(Arc::new(|page: &PageWeight| {
                println!("{}", format_page_weight_row(page));
            }))
        }
        OutputTarget::File(_) => None,
    };

    let report = execute_page_weigh(&config, on_page).await?;

    if let OutputTarget::File(ref dir) = config.output {
        let path = write_csv_report(
            dir,
            ReportKind::PageSizes,
            &generate_page_weight_csv(&report),
        )?;
        print_saved(&path);
    }
    print_summary("PAGE WEIGH COMPLETE", &report.summary());
    Ok(())
}

pub async fn run_scan(config: StringScanConfig) -> Result<()> {
    let on_row: Option<StringCheckCallback> = match config.output {
        OutputTarget::Console => {
            println!("{}", string_scan_table_header(&config.search_strings));
            let search_count = config.search_strings.len();
            Some(Arc::new(move |row: &StringCheck| {
                println!("{}", format_string_check_row(row, search_count));
            }))
        }
        OutputTarget::File(_) => None,
    };

    let report = execute_string_scan(&config, on_row).await?;

    if let OutputTarget::File(ref dir) = config.output {
        let path = write_csv_report(
            dir,
            ReportKind::SitemapResults,
            &generate_string_scan_csv(&report),
        )?;
        print_saved(&path);
    }
    print_summary("STRING SCAN COMPLETE", &report.summary());
    Ok(())
}

// ============================================================================
// Subcommand entry points
// ============================================================================

pub async fn handle_assets(args: &ArgMatches, show_progress: bool) -> Result<()> {
    let config = {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
        collect_asset_config(args, &mut prompter, show_progress)?
    };

    match config {
        Some(config) => run_assets(config).await,
        None => {
            print_exit();
            Ok(())
        }
    }
}

pub async fn handle_weigh(args: &ArgMatches, show_progress: bool) -> Result<()> {
    let config = {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
        collect_weigh_config(args, &mut prompter, show_progress)?
    };

    match config {
        Some(config) => run_weigh(config).await,
        None => {
            print_exit();
            Ok(())
        }
    }
}

pub async fn handle_scan(args: &ArgMatches, show_progress: bool) -> Result<()> {
    let config = {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
        collect_scan_config(args, &mut prompter, show_progress)?
    };

    match config {
        Some(config) => run_scan(config).await,
        None => {
            print_exit();
            Ok(())
        }
    }
}
