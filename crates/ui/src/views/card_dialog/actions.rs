use std::sync::Arc;

use dioxus::prelude::*;
use services::CardGateway;

use crate::collaborators::DialogCollaborators;
use crate::vm::{CardDialogVm, FormEdit, load_default_icons};

use super::chrome::DialogChrome;

/// Route field-editor messages into the view-model.
pub(super) fn build_edit_action(vm: Signal<CardDialogVm>) -> Callback<FormEdit> {
    use_callback(move |edit: FormEdit| {
        let mut vm = vm;
        vm.write().apply(edit);
    })
}

pub(super) fn build_cancel_action(vm: Signal<CardDialogVm>) -> Callback<()> {
    use_callback(move |()| {
        let mut vm = vm;
        vm.write().cancel();
    })
}

pub(super) fn build_submit_action(
    vm: Signal<CardDialogVm>,
    gateway: Arc<dyn CardGateway>,
    collaborators: DialogCollaborators,
) -> Callback<()> {
    use_callback(move |()| {
        let mut vm = vm;
        let Some(ticket) = vm.write().begin_submit() else {
            return;
        };
        let gateway = Arc::clone(&gateway);
        let collaborators = collaborators.clone();
        spawn(async move {
            let outcome = ticket
                .run(gateway.as_ref(), collaborators.notifier.as_ref())
                .await;
            vm.write().finish_submit(outcome, &collaborators);
        });
    })
}

/// Icon discovery, fired when the URL field loses focus.
pub(super) fn build_favicon_action(
    vm: Signal<CardDialogVm>,
    gateway: Arc<dyn CardGateway>,
    chrome: DialogChrome,
) -> Callback<()> {
    use_callback(move |()| {
        let mut vm = vm;
        let Some(request) = vm.write().begin_favicon_discovery() else {
            return;
        };
        let gateway = Arc::clone(&gateway);
        spawn(async move {
            let response = request.run(gateway.as_ref()).await;
            vm.write().finish_favicon_discovery(response, &chrome);
        });
    })
}

/// Pick a site archive from disk and send it to the upload route.
pub(super) fn build_archive_upload_action(
    vm: Signal<CardDialogVm>,
    gateway: Arc<dyn CardGateway>,
    collaborators: DialogCollaborators,
) -> Callback<()> {
    use_callback(move |()| {
        let gateway = Arc::clone(&gateway);
        let collaborators = collaborators.clone();
        spawn(async move {
            let Some(file) = rfd::AsyncFileDialog::new()
                .set_title("Upload site archive")
                .add_filter("Zip archives", &["zip"])
                .pick_file()
                .await
            else {
                return;
            };
            let bytes = file.read().await;
            let Some(upload) = vm.peek().begin_archive_upload(file.file_name(), bytes) else {
                return;
            };
            let outcome = upload
                .run(gateway.as_ref(), collaborators.notifier.as_ref())
                .await;
            let mut vm = vm;
            vm.write()
                .finish_archive_upload(outcome, collaborators.notifier.as_ref());
        });
    })
}

/// The icon picker reports a user choice.
pub(super) fn build_pick_icon_action(
    vm: Signal<CardDialogVm>,
    chrome: DialogChrome,
) -> Callback<Option<hub_core::model::IconRef>> {
    use_callback(move |icon: Option<hub_core::model::IconRef>| {
        let mut selected = chrome.icon_selected;
        selected.set(icon.clone());
        let mut vm = vm;
        vm.write().icon_change(icon);
    })
}

/// Deferred half of `open`: runs after the dialog has rendered.
pub(super) fn use_settle_effect(vm: Signal<CardDialogVm>, collaborators: DialogCollaborators) {
    use_effect(move || {
        let pending = {
            let current = vm.read();
            current.visible() && current.pending_init()
        };
        if pending {
            let mut vm = vm;
            vm.write().settle(&collaborators);
        }
    });
}

/// Fetch the default icon set once per mounted dialog.
pub(super) fn use_default_icons(gateway: Arc<dyn CardGateway>, chrome: DialogChrome) {
    use_future(move || {
        let gateway = Arc::clone(&gateway);
        async move {
            load_default_icons(gateway.as_ref(), &chrome).await;
        }
    });
}
