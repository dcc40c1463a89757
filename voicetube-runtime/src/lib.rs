pub mod config_store;
pub mod runtime_engine;
pub mod secrets;
pub mod youtube;
