pub mod config;
pub mod games;
pub mod logging;
pub mod timer;
