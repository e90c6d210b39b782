pub mod browser;
#[cfg(feature = "browser")]
pub mod chromium;
pub mod fetcher;
pub mod trends_api;
pub mod traits;

pub use browser::RenderedTrendsScraper;
#[cfg(feature = "browser")]
pub use chromium::ChromiumDriver;
pub use fetcher::ZapClient;
pub use trends_api::TrendsApiClient;
pub use traits::{BrowserDriver, RetailSearch, TrendsSource};
