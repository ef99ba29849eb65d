use std::rc::Rc;

use dioxus::prelude::*;
use hub_core::model::{CategoryId, IconRef};

use crate::collaborators::{
    CategorySelector, DialogCollaborators, IconSelector, Notifier, RefreshSink,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

/// Signal-backed stand-ins for the picker widgets and the global notifier.
#[derive(Clone, Copy)]
pub struct DialogChrome {
    pub loading: Signal<Option<String>>,
    pub toast: Signal<Option<Toast>>,
    pub category_epoch: Signal<u32>,
    pub icon_candidates: Signal<Vec<IconRef>>,
    pub icon_defaults: Signal<Vec<IconRef>>,
    pub icon_selected: Signal<Option<IconRef>>,
}

pub fn use_dialog_chrome() -> DialogChrome {
    DialogChrome {
        loading: use_signal(|| None),
        toast: use_signal(|| None),
        category_epoch: use_signal(|| 0),
        icon_candidates: use_signal(Vec::new),
        icon_defaults: use_signal(Vec::new),
        icon_selected: use_signal(|| None),
    }
}

impl DialogChrome {
    #[must_use]
    pub fn collaborators(self, on_refresh: EventHandler<CategoryId>) -> DialogCollaborators {
        let chrome = Rc::new(self);
        DialogCollaborators {
            category: chrome.clone(),
            icon: chrome.clone(),
            notifier: chrome,
            refresh: Rc::new(RefreshHandler(on_refresh)),
        }
    }
}

impl CategorySelector for DialogChrome {
    fn init(&self) {
        let mut epoch = self.category_epoch;
        *epoch.write() += 1;
    }
}

impl IconSelector for DialogChrome {
    fn init(&self, current: Option<&IconRef>) {
        let mut candidates = self.icon_candidates;
        let mut selected = self.icon_selected;
        candidates.set(current.cloned().into_iter().collect());
        selected.set(current.cloned());
    }

    fn supply_candidate(&self, url: &str) {
        let mut candidates = self.icon_candidates;
        let mut selected = self.icon_selected;
        let icon = IconRef::new(url);
        if !candidates.peek().contains(&icon) {
            candidates.write().push(icon.clone());
        }
        selected.set(Some(icon));
    }

    fn offer_defaults(&self, icons: &[IconRef]) {
        let mut defaults = self.icon_defaults;
        defaults.set(icons.to_vec());
    }

    fn selected(&self) -> Option<IconRef> {
        self.icon_selected.peek().clone()
    }
}

impl Notifier for DialogChrome {
    fn loading(&self, message: &str) {
        let mut loading = self.loading;
        loading.set(Some(message.to_string()));
    }

    fn close_loading(&self) {
        let mut loading = self.loading;
        loading.set(None);
    }

    fn msg_success(&self, message: &str) {
        let mut toast = self.toast;
        toast.set(Some(Toast::Success(message.to_string())));
    }

    fn msg_error(&self, message: &str) {
        let mut toast = self.toast;
        toast.set(Some(Toast::Error(message.to_string())));
    }
}

struct RefreshHandler(EventHandler<CategoryId>);

impl RefreshSink for RefreshHandler {
    fn refresh(&self, category: &CategoryId) {
        self.0.call(category.clone());
    }
}
