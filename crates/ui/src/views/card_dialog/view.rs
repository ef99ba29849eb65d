use std::sync::Arc;

use dioxus::prelude::*;
use hub_core::model::{CardType, CategoryId};
use hub_core::validation::FormField;
use services::CardGateway;

use crate::vm::{CardDialogVm, CategoryOptionVm, FormEdit, category_from_value};

use super::actions::{
    build_archive_upload_action, build_cancel_action, build_edit_action, build_favicon_action,
    build_pick_icon_action, build_submit_action, use_default_icons, use_settle_effect,
};
use super::chrome::use_dialog_chrome;
use super::components::{ArchiveList, CardTypePicker, DialogOverlays, IconPicker, InlineError};

#[derive(Props, Clone)]
pub struct CardDialogProps {
    /// Owned by the host, which opens the dialog through `CardDialogVm::open`.
    pub vm: Signal<CardDialogVm>,
    pub gateway: Arc<dyn CardGateway>,
    pub categories: Vec<CategoryOptionVm>,
    pub on_refresh: EventHandler<CategoryId>,
}

impl PartialEq for CardDialogProps {
    fn eq(&self, other: &Self) -> bool {
        self.vm == other.vm
            && Arc::ptr_eq(&self.gateway, &other.gateway)
            && self.categories == other.categories
            && self.on_refresh == other.on_refresh
    }
}

#[component]
pub fn CardDialogView(props: CardDialogProps) -> Element {
    let vm = props.vm;
    let chrome = use_dialog_chrome();
    let collaborators = chrome.collaborators(props.on_refresh);

    let on_edit = build_edit_action(vm);
    let on_cancel = build_cancel_action(vm);
    let on_submit = build_submit_action(vm, Arc::clone(&props.gateway), collaborators.clone());
    let on_url_blur = build_favicon_action(vm, Arc::clone(&props.gateway), chrome);
    let on_pick_icon = build_pick_icon_action(vm, chrome);
    let on_upload =
        build_archive_upload_action(vm, Arc::clone(&props.gateway), collaborators.clone());
    use_settle_effect(vm, collaborators);
    use_default_icons(Arc::clone(&props.gateway), chrome);

    let overlays = rsx! {
        DialogOverlays {
            loading: chrome.loading.read().clone(),
            toast: chrome.toast.read().clone(),
            on_dismiss: move |()| {
                let mut toast = chrome.toast;
                toast.set(None);
            },
        }
    };

    let state = vm.read();
    if !state.visible() {
        return overlays;
    }

    let form = state.form().clone();
    let errors = state.errors().clone();
    let title = state.title();
    let is_apply = state.is_apply();
    let favicon_loading = state.favicon_loading();
    let archives = state.archive_list().to_vec();
    drop(state);

    let category_value = form
        .category
        .as_ref()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default();
    let categories = props.categories.clone();
    let category_epoch = *chrome.category_epoch.read();
    let icon_candidates = chrome.icon_candidates.read().clone();
    let icon_defaults = chrome.icon_defaults.read().clone();
    let icon_selected = chrome.icon_selected.read().clone();

    rsx! {
        div { class: "card-dialog-overlay",
            div {
                class: "card-dialog",
                role: "dialog",
                aria_modal: "true",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "card-dialog-title", "{title}" }
                if is_apply {
                    p { class: "card-dialog-hint",
                        "Your request will be reviewed by an administrator before it is published."
                    }
                }

                div { class: "card-dialog-group",
                    label { class: "card-dialog-label", "Type" }
                    CardTypePicker { selected: form.card_type, on_edit }
                }

                div { class: "card-dialog-group",
                    label { class: "card-dialog-label", r#for: "card-category", "Category" }
                    select {
                        "data-epoch": "{category_epoch}",
                        id: "card-category",
                        value: "{category_value}",
                        onchange: move |evt| {
                            on_edit.call(FormEdit::SetCategory(category_from_value(&categories, &evt.value())));
                        },
                        onblur: move |_| on_edit.call(FormEdit::Blur(FormField::Category)),
                        option { value: "", "Select a category" }
                        for opt in props.categories.iter() {
                            option {
                                key: "{opt.id}",
                                value: "{opt.id}",
                                selected: opt.id.as_str() == category_value,
                                "{opt.label}"
                            }
                        }
                    }
                    InlineError { message: errors.message(FormField::Category) }
                }

                div { class: "card-dialog-group",
                    label { class: "card-dialog-label", r#for: "card-title", "Title" }
                    input {
                        id: "card-title",
                        class: "card-dialog-input",
                        value: "{form.title}",
                        oninput: move |evt| on_edit.call(FormEdit::SetTitle(evt.value())),
                        onblur: move |_| on_edit.call(FormEdit::Blur(FormField::Title)),
                    }
                    InlineError { message: errors.message(FormField::Title) }
                }

                div { class: "card-dialog-group",
                    label { class: "card-dialog-label", r#for: "card-url", "Link" }
                    input {
                        id: "card-url",
                        class: "card-dialog-input",
                        placeholder: "https://",
                        value: "{form.url}",
                        oninput: move |evt| on_edit.call(FormEdit::SetUrl(evt.value())),
                        onblur: move |_| on_url_blur.call(()),
                    }
                }

                div { class: "card-dialog-group",
                    label { class: "card-dialog-label", "Icon" }
                    IconPicker {
                        candidates: icon_candidates,
                        defaults: icon_defaults,
                        selected: icon_selected,
                        loading: favicon_loading,
                        on_pick: on_pick_icon,
                    }
                    InlineError { message: errors.message(FormField::Icon) }
                }

                if form.card_type == CardType::Zip {
                    div { class: "card-dialog-group",
                        label { class: "card-dialog-label", "Site archive" }
                        ArchiveList { archives, on_edit, on_upload }
                        InlineError { message: errors.message(FormField::Zip) }
                    }
                }

                div { class: "card-dialog-group",
                    label { class: "card-dialog-label", r#for: "card-content", "Content" }
                    textarea {
                        id: "card-content",
                        class: "card-dialog-input card-dialog-input--multi",
                        value: "{form.content}",
                        oninput: move |evt| on_edit.call(FormEdit::SetContent(evt.value())),
                        onblur: move |_| on_edit.call(FormEdit::Blur(FormField::Content)),
                    }
                    InlineError { message: errors.message(FormField::Content) }
                }

                div { class: "card-dialog-group",
                    label { class: "card-dialog-label", r#for: "card-private", "Private content" }
                    textarea {
                        id: "card-private",
                        class: "card-dialog-input card-dialog-input--multi",
                        value: "{form.private_content}",
                        oninput: move |evt| on_edit.call(FormEdit::SetPrivateContent(evt.value())),
                    }
                }

                label { class: "card-dialog-check",
                    input {
                        r#type: "checkbox",
                        checked: form.show_qrcode,
                        onchange: move |evt| on_edit.call(FormEdit::SetShowQrcode(evt.checked())),
                    }
                    "Show QR code"
                }

                div { class: "card-dialog-actions",
                    button {
                        class: "btn card-dialog-cancel",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_submit.call(()),
                        "Submit"
                    }
                }
            }
        }
        {overlays}
    }
}
