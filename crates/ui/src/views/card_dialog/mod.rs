mod actions;
mod chrome;
mod components;
mod view;

pub use chrome::{DialogChrome, Toast};
pub use view::{CardDialogProps, CardDialogView};

#[cfg(test)]
mod view_smoke;
