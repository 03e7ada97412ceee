//! `TaskDeck`: terminal task tracker with idle nudges.

pub mod app;
pub mod config;
pub mod idle;
pub mod notifications;
pub mod tasks;
pub mod ui;
