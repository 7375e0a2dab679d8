pub mod config;
pub mod data;
pub mod labels;
pub mod pages;
pub mod processing;
pub mod render;
pub mod server;
pub mod types;
pub mod widgets;
