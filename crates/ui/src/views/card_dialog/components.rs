use dioxus::prelude::*;
use hub_core::model::{ArchiveRef, CardType, IconRef};

use crate::vm::FormEdit;

use super::chrome::Toast;

#[component]
pub fn InlineError(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "card-dialog-error", "{message}" }
        }
    }
}

#[component]
pub fn CardTypePicker(selected: CardType, on_edit: Callback<FormEdit>) -> Element {
    rsx! {
        div { class: "card-dialog-types", role: "radiogroup",
            for (kind, code, text) in CardType::ALL.map(|k| (k, k.as_str(), k.label())) {
                label { key: "{code}", class: "card-dialog-type",
                    input {
                        r#type: "radio",
                        name: "card-type",
                        value: "{code}",
                        checked: kind == selected,
                        disabled: !kind.is_selectable(),
                        onchange: move |_| on_edit.call(FormEdit::SetType(kind)),
                    }
                    "{text}"
                }
            }
        }
    }
}

#[component]
pub fn IconPicker(
    candidates: Vec<IconRef>,
    defaults: Vec<IconRef>,
    selected: Option<IconRef>,
    loading: bool,
    on_pick: Callback<Option<IconRef>>,
) -> Element {
    // Discovered candidates first, then the default set without duplicates.
    let mut icons = candidates;
    for icon in defaults {
        if !icons.contains(&icon) {
            icons.push(icon);
        }
    }

    rsx! {
        div { class: "card-dialog-icons",
            if loading {
                span { class: "card-dialog-spinner", "Looking for icons..." }
            }
            for icon in icons {
                button {
                    key: "{icon}",
                    r#type: "button",
                    class: if selected.as_ref() == Some(&icon) {
                        "card-dialog-icon card-dialog-icon--selected"
                    } else {
                        "card-dialog-icon"
                    },
                    onclick: {
                        let icon = icon.clone();
                        move |_| on_pick.call(Some(icon.clone()))
                    },
                    img { src: "{icon}", alt: "icon candidate" }
                }
            }
            if selected.is_some() {
                button {
                    r#type: "button",
                    class: "btn card-dialog-icon-clear",
                    onclick: move |_| on_pick.call(None),
                    "Clear icon"
                }
            }
        }
    }
}

#[component]
pub fn ArchiveList(
    archives: Vec<ArchiveRef>,
    on_edit: Callback<FormEdit>,
    on_upload: Callback<()>,
) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "btn card-dialog-archive-upload",
            onclick: move |_| on_upload.call(()),
            if archives.is_empty() { "Upload zip" } else { "Replace zip" }
        }
        ul { class: "card-dialog-archives",
            for archive in archives {
                li { key: "{archive.path}",
                    span { class: "card-dialog-archive-name", "{archive.name}" }
                    if archive.is_new {
                        span { class: "card-dialog-archive-badge", "new" }
                    }
                    button {
                        r#type: "button",
                        class: "btn card-dialog-archive-remove",
                        onclick: move |_| on_edit.call(FormEdit::ArchiveRemoved),
                        "Remove"
                    }
                }
            }
        }
    }
}

#[component]
pub fn DialogOverlays(
    loading: Option<String>,
    toast: Option<Toast>,
    on_dismiss: EventHandler<()>,
) -> Element {
    rsx! {
        if let Some(message) = loading {
            div { class: "card-dialog-loading",
                p { "{message}" }
            }
        }
        {
            match toast {
                Some(Toast::Success(message)) => rsx! {
                    div {
                        class: "toast toast--success",
                        onclick: move |_| on_dismiss.call(()),
                        "{message}"
                    }
                },
                Some(Toast::Error(message)) => rsx! {
                    div {
                        class: "toast toast--error",
                        onclick: move |_| on_dismiss.call(()),
                        "{message}"
                    }
                },
                None => rsx! {},
            }
        }
    }
}
