pub mod engine_case_game;
pub mod engine_upgrade_game;
