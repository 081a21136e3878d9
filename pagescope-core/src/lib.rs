pub mod config;
pub mod report;
pub mod run;

pub use run::{execute_asset_scan, execute_page_weigh, execute_string_scan};

const BANNER: &str = r#"

   ___  ___ ____ ____ ___ _______  ___  ___
  / _ \/ _ `/ _ `/ -_|_-</ __/ _ \/ _ \/ -_)
 / .__/\_,_/\_, /\__/___/\__/\___/ .__/\__/
/_/        /___/                /_/
"#;

pub fn print_banner() {
    println!("{}", BANNER);
    println!(
        "  pagescope v{} - page weight, oversized assets and sitemap string checks\n",
        env!("CARGO_PKG_VERSION")
    );
}
