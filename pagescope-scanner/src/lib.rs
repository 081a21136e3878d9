pub mod assets;
pub mod error;
pub mod fetcher;
pub mod result;
pub mod search;
pub mod sitemap;

pub use error::ScanError;
pub use fetcher::Fetcher;
pub use result::{AssetProbe, AssetRecord, PageAssets, PageWeight, StringCheck};
