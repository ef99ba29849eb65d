use dioxus::prelude::*;
use hub_core::model::{CardForm, CardId, CategoryId, DialogMode, IconRef};

use crate::context::AppContext;
use crate::views::CardDialogView;
use crate::vm::CardDialogVm;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let mut vm = use_signal(CardDialogVm::new);
    let mut last_refresh = use_signal(|| None::<CategoryId>);

    let create_category = ctx.default_category();
    let edit_category = create_category.clone();
    let has_category = create_category.is_some();
    let refreshed = last_refresh.read().clone();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Card Hub" }

        div { class: "app-root",
            div { class: "page",
                h2 { "Cards" }
                div { class: "page-actions",
                    button {
                        class: "btn btn-primary",
                        disabled: !has_category,
                        onclick: move |_| {
                            if let Some(category) = create_category.clone() {
                                vm.write().open(DialogMode::CreateInCategory(category));
                            }
                        },
                        "New card"
                    }
                    button {
                        class: "btn",
                        onclick: move |_| vm.write().open(DialogMode::ApplyNew),
                        "Apply for a card"
                    }
                    button {
                        class: "btn",
                        disabled: !has_category,
                        onclick: move |_| {
                            if let Some(category) = edit_category.clone() {
                                vm.write().open_seed(sample_card(category));
                            }
                        },
                        "Edit sample card"
                    }
                }
                if let Some(category) = refreshed {
                    p { class: "page-status", "Reloaded category {category}" }
                }
            }

            CardDialogView {
                vm,
                gateway: ctx.gateway(),
                categories: ctx.categories().to_vec(),
                on_refresh: move |category: CategoryId| {
                    tracing::info!(%category, "category listing refresh requested");
                    last_refresh.set(Some(category));
                },
            }
        }
    }
}

fn sample_card(category: CategoryId) -> CardForm {
    CardForm {
        id: Some(CardId::new("sample")),
        title: "Rust".into(),
        content: "The Rust programming language.".into(),
        url: "https://www.rust-lang.org".into(),
        icon: Some(IconRef::new("https://www.rust-lang.org/static/images/favicon.svg")),
        ..CardForm::blank_in(category)
    }
}
