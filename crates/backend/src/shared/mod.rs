pub mod config;
pub mod pharmatech;
