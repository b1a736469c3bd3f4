//! Pipeline entry points.
//!
//! - `run_forecast`: Scrape the mountain forecast page
//! - `run_points`: Request point forecasts for every summit
//! - `publish`: Write both artifacts to storage
//! - `run_pipeline`: All of the above, in order

pub mod forecast;
pub mod points;
pub mod publish;
pub mod refresh;

pub use forecast::run_forecast;
pub use points::run_points;
pub use publish::{PublishSummary, publish};
pub use refresh::{RunOptions, RunSummary, run_pipeline};
