mod image_fetcher;
mod progress;
mod record_source;

pub use image_fetcher::*;
pub use progress::*;
pub use record_source::*;
