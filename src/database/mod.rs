pub mod models;
pub mod photo_repo;
pub mod roster_repo;
pub mod settings_repo;
