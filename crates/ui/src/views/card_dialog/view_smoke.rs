use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use hub_core::model::{ArchiveRef, CardForm, CardId, CardType, CategoryId, DialogMode};
use services::CardGateway;

use crate::test_support::{MockGateway, Recorder, complete_card};
use crate::vm::{CardDialogVm, CategoryOptionVm};

use super::CardDialogView;

#[derive(Props, Clone, PartialEq)]
struct HarnessProps {
    mode: Option<DialogMode>,
    attempt_submit: bool,
    #[props(default)]
    defaults: Vec<&'static str>,
}

#[component]
fn DialogHarness(props: HarnessProps) -> Element {
    let vm = use_signal(move || {
        let mut vm = CardDialogVm::new();
        if let Some(mode) = props.mode.clone() {
            vm.open(mode);
        }
        if props.attempt_submit {
            let _ = vm.begin_submit();
        }
        vm
    });
    let defaults = props.defaults.clone();
    let gateway = use_hook(move || -> Arc<dyn CardGateway> {
        Arc::new(MockGateway::new(&Recorder::default()).with_defaults(&defaults))
    });
    let categories = vec![
        CategoryOptionVm::new(CategoryId::new("tools"), "Tools"),
        CategoryOptionVm::new(CategoryId::new("sites"), "Sites"),
    ];
    let pending = vm.read().pending_init();
    rsx! {
        CardDialogView {
            vm,
            gateway,
            categories,
            on_refresh: move |_| {},
        }
        span { id: "pending-init", "{pending}" }
    }
}

fn render(mode: Option<DialogMode>, attempt_submit: bool) -> String {
    let mut dom = VirtualDom::new_with_props(
        DialogHarness,
        HarnessProps {
            mode,
            attempt_submit,
            defaults: Vec::new(),
        },
    );
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[test]
fn closed_dialog_renders_no_form() {
    let html = render(None, false);
    assert!(!html.contains("card-dialog-title"), "unexpected form in {html}");
}

#[test]
fn edit_mode_renders_record() {
    let record = CardForm {
        id: Some(CardId::new("7")),
        card_type: CardType::Zip,
        zip: Some(ArchiveRef::stored("/ext/site.zip", "site.zip")),
        ..complete_card("sites")
    };
    let html = render(Some(DialogMode::from_seed(record)), false);
    assert!(html.contains("Edit Card"), "missing title in {html}");
    assert!(html.contains("Rust"), "missing card title in {html}");
    assert!(html.contains("site.zip"), "missing archive in {html}");
    assert!(html.contains("Site archive"), "missing archive section in {html}");
}

#[test]
fn apply_mode_shows_review_hint() {
    let html = render(Some(DialogMode::ApplyNew), false);
    assert!(html.contains("Apply for Card"), "missing title in {html}");
    assert!(html.contains("reviewed by an administrator"), "missing hint in {html}");
    assert!(!html.contains("Site archive"), "archive section shown in {html}");
}

#[test]
fn blocked_submit_renders_inline_errors() {
    let html = render(
        Some(DialogMode::CreateInCategory(CategoryId::new("tools"))),
        true,
    );
    assert!(html.contains("Create Card"), "missing title in {html}");
    assert!(html.contains("Title is required."), "missing title error in {html}");
    assert!(html.contains("Content is required."), "missing content error in {html}");
    assert!(html.contains("Please add an icon."), "missing icon error in {html}");
    assert!(!html.contains("Category is required."), "unexpected category error in {html}");
}

#[test]
fn file_type_is_rendered_disabled() {
    let html = render(Some(DialogMode::ApplyNew), false);
    assert!(html.contains("Static site"), "missing zip option in {html}");
    assert!(html.contains("disabled"), "file option not disabled in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn open_dialog_settles_after_first_render() {
    let mut dom = VirtualDom::new_with_props(
        DialogHarness,
        HarnessProps {
            mode: Some(DialogMode::CreateInCategory(CategoryId::new("tools"))),
            attempt_submit: false,
            defaults: vec!["/ext-resources/images/default/github.png"],
        },
    );
    dom.rebuild_in_place();
    let first = dioxus_ssr::render(&dom);
    assert!(first.contains(r#"<span id="pending-init">true</span>"#), "{first}");

    for _ in 0..4 {
        let _ = tokio::time::timeout(Duration::from_millis(50), dom.wait_for_work()).await;
        dom.render_immediate_to_vec();
    }

    let html = dioxus_ssr::render(&dom);
    assert!(html.contains(r#"<span id="pending-init">false</span>"#), "{html}");
    assert!(html.contains(r#"data-epoch="1""#), "category picker not re-initialised: {html}");
    assert!(
        html.contains("/ext-resources/images/default/github.png"),
        "default icons not offered: {html}"
    );
}
