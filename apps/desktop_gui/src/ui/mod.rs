//! UI layer for the desktop app: app shell and patient workspace panels.

pub mod app;
