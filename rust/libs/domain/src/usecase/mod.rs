mod fetch_images;
mod retry;

pub use fetch_images::*;
pub use retry::*;
