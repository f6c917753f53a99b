// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cep;
pub mod config;
pub mod core;
pub mod gui;
pub mod quote;
pub mod scrape;
pub mod widget;
