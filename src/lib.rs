pub mod config;
pub mod domain;
pub mod mail;
pub mod state;
pub mod store;
pub mod tasks;
pub mod terminal;
pub mod view;
