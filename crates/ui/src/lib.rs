pub mod app;
pub mod collaborators;
pub mod context;
pub mod views;
pub mod vm;

#[cfg(test)]
mod test_support;

pub use app::App;
pub use context::{AppContext, UiApp, build_app_context};
