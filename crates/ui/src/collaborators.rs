//! Widgets and services the card dialog drives but does not own.

use std::rc::Rc;

use hub_core::model::{CategoryId, IconRef};

/// Category picker embedded in the dialog.
pub trait CategorySelector {
    /// Re-synchronize the displayed options.
    fn init(&self);
}

/// Icon picker embedded in the dialog.
pub trait IconSelector {
    /// Seed the picker with the card's current icon, if any.
    fn init(&self, current: Option<&IconRef>);

    /// Append one externally discovered candidate and select it.
    fn supply_candidate(&self, url: &str);

    /// Offer the server's default icon set alongside the candidates. Selection is unchanged.
    fn offer_defaults(&self, icons: &[IconRef]);

    /// The icon currently selected in the picker.
    fn selected(&self) -> Option<IconRef>;
}

/// Global toast and loading-overlay service.
pub trait Notifier {
    fn loading(&self, message: &str);
    fn close_loading(&self);
    fn msg_success(&self, message: &str);
    fn msg_error(&self, message: &str);
}

/// Hosting view, told which category listing to reload after a save.
pub trait RefreshSink {
    fn refresh(&self, category: &CategoryId);
}

/// Everything the dialog talks to besides the backend.
#[derive(Clone)]
pub struct DialogCollaborators {
    pub category: Rc<dyn CategorySelector>,
    pub icon: Rc<dyn IconSelector>,
    pub notifier: Rc<dyn Notifier>,
    pub refresh: Rc<dyn RefreshSink>,
}

/// Keeps the long-operation overlay up for as long as it lives.
///
/// Dropping it closes the overlay exactly once, whether the guarded operation
/// finished, failed, panicked or was cancelled.
pub struct LoadingGuard<'a> {
    notifier: &'a dyn Notifier,
}

impl<'a> LoadingGuard<'a> {
    #[must_use]
    pub fn raise(notifier: &'a dyn Notifier, message: &str) -> Self {
        notifier.loading(message);
        Self { notifier }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.notifier.close_loading();
    }
}
