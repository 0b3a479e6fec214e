pub mod application;
pub mod availability;
pub mod catalog;
pub mod dialog;
pub mod display;
pub mod geometry;
pub mod host;
pub mod input;
pub mod menu;
pub mod ui;
