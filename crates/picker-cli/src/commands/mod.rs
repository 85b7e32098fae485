pub mod config_ops;
pub mod mru_ops;
pub mod search_ops;
