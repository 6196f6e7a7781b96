#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod input;
pub mod ir;
pub mod layout;
pub mod layout_dump;

pub use config::{Config, LayoutConfig, load_config};
pub use input::{load_dataset, parse_dataset};
pub use ir::{Dataset, TimeScale, TimelineElement, TimelineRow};
pub use layout::{LayoutOptions, compute_timeline_layout};

#[cfg(feature = "cli")]
pub use cli::run;
