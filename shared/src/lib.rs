pub mod constants;
pub mod error;
pub mod item;
pub mod session;
pub mod shared_case_game;
pub mod shared_upgrade_game;
