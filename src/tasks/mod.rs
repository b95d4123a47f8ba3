//! Background Tasks Module
//!
//! # Tasks
//! - TTL Reaper: Purges expired cache entries at a configured interval

mod reaper;

pub use reaper::{spawn_reaper_from_config, spawn_reaper_task};
