use clap::{arg, command};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

/// Flags shared by every subcommand. Anything left out is prompted for.
fn with_common_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        arg!(-o --"output" <DESTINATION>)
            .required(false)
            .help("Where to send results: console or file (prompted when omitted)")
            .value_parser(["console", "file"]),
    )
    .arg(
        arg!(--"output-dir" <PATH>)
            .required(false)
            .help("Directory for CSV reports")
            .default_value(pagescope_core::config::DEFAULT_OUTPUT_DIR),
    )
    .arg(
        arg!(--"timeout" <SECS>)
            .required(false)
            .help(format!(
                "Per-request timeout in seconds [default: {}]",
                pagescope_core::config::DEFAULT_TIMEOUT_SECS
            )),
    )
}

fn sitemap_arg() -> clap::Arg {
    arg!(-s --"sitemap" <URL>)
        .required(false)
        .help("Sitemap XML to read page URLs from")
        .conflicts_with("urls")
}

fn urls_arg() -> clap::Arg {
    arg!(-u --"urls" <URLS>)
        .required(false)
        .help("Comma-separated list of page URLs")
        .conflicts_with("sitemap")
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("pagescope")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("pagescope")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Log every request").required(false))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(with_common_args(
            command!("assets")
                .about("List page assets at or above a size threshold")
                .arg(urls_arg().help("Comma-separated list of page URLs (prompted when omitted)"))
                .arg(sitemap_arg())
                .arg(
                    arg!(-t --"threshold" <KB>)
                        .required(false)
                        .help("Size threshold in kilobytes (prompted when omitted)"),
                ),
        ))
        .subcommand(with_common_args(
            command!("weigh")
                .about("Report the total asset weight of every page in a sitemap")
                .arg(sitemap_arg().help("Sitemap XML to read page URLs from (prompted when omitted)"))
                .arg(urls_arg()),
        ))
        .subcommand(with_common_args(
            command!("scan")
                .about("Check every page in a sitemap for literal search strings")
                .arg(sitemap_arg().help("Sitemap XML to read page URLs from (prompted when omitted)"))
                .arg(urls_arg())
                .arg(
                    arg!(-S --"search" <STRINGS>)
                        .required(false)
                        .help("Comma-separated search strings (prompted when omitted)"),
                ),
        ))
}
