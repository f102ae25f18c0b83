//! UI layer for the desktop workbench: app shell, case form, results and map painting.

pub mod app;
pub mod form;
pub mod map_view;
pub mod results;

pub use app::WorkbenchApp;
