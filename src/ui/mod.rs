//! egui user interface
//!
//! Panel composition lives in `app`, drawing in `components`, colors and
//! spacing in `theme`. Everything here reads `PanelState` and writes back
//! only through its request methods.

pub mod app;
pub mod components;
pub mod theme;

pub use app::BanterApp;
pub use theme::Theme;
