//! Headless state of the card create/edit/apply dialog.
//!
//! The view-model is the only writer of the form. Widgets report changes as
//! [`FormEdit`] messages, and the two long-running flows (save, icon discovery)
//! are split into `begin_*` / `run` / `finish_*` so that no borrow of the
//! view-model is held while a request is in flight.

use hub_core::model::{
    ArchiveRef, CardForm, CardType, CategoryId, DialogKind, DialogMode, IconRef,
    has_discoverable_url,
};
use hub_core::validation::{FormField, Trigger, ValidationErrors, rules_for, validate_form};
use services::{CardApiError, CardGateway};

use crate::collaborators::{DialogCollaborators, IconSelector, LoadingGuard, Notifier};

pub const EXTRACTION_NOTICE: &str =
    "Extracting the site archive takes a while, please wait...";
pub const SAVED_NOTICE: &str = "Saved successfully";
pub const UPLOAD_NOTICE: &str = "Uploading the site archive...";

/// Update messages from the field editors bound to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    SetType(CardType),
    SetCategory(Option<CategoryId>),
    SetTitle(String),
    SetContent(String),
    SetPrivateContent(String),
    SetUrl(String),
    SetShowQrcode(bool),
    Blur(FormField),
    IconChanged(Option<IconRef>),
    ArchiveUploaded { path: String, file_name: String },
    ArchiveRemoved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Validation failed; nothing was sent.
    Blocked,
    Saved,
    Failed,
}

/// A validated snapshot ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    payload: CardForm,
    category: CategoryId,
    extracts_archive: bool,
    session: u64,
}

pub struct SubmitOutcome {
    category: CategoryId,
    session: u64,
    result: Result<(), CardApiError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaviconRequest {
    url: String,
    session: u64,
}

pub struct FaviconResponse {
    session: u64,
    result: Result<Vec<String>, CardApiError>,
}

/// A picked archive waiting to be sent to the upload route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveUpload {
    file_name: String,
    bytes: Vec<u8>,
    session: u64,
}

pub struct ArchiveUploadOutcome {
    file_name: String,
    session: u64,
    result: Result<String, CardApiError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardDialogVm {
    visible: bool,
    title: &'static str,
    kind: DialogKind,
    is_apply: bool,
    form: CardForm,
    archive_list: Vec<ArchiveRef>,
    errors: ValidationErrors,
    favicon_loading: bool,
    pending_init: bool,
    session: u64,
}

impl Default for CardDialogVm {
    fn default() -> Self {
        Self::new()
    }
}

impl CardDialogVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: false,
            title: "",
            kind: DialogKind::ApplyNew,
            is_apply: false,
            form: CardForm::blank(),
            archive_list: Vec::new(),
            errors: ValidationErrors::default(),
            favicon_loading: false,
            pending_init: false,
            session: 0,
        }
    }

    // ─── Dialog state ─────────────────────────────────────────────────────────

    /// Start a new dialog session. Form content is rebuilt from `mode`; nothing
    /// from the previous session survives. Collaborator initialization is left
    /// to [`CardDialogVm::settle`], once the view has rendered.
    pub fn open(&mut self, mode: DialogMode) {
        let kind = mode.kind();
        self.session = self.session.wrapping_add(1);
        self.kind = kind;
        self.title = kind.title();
        self.is_apply = mode.is_apply();
        self.form = mode.into_form();
        self.archive_list = self.form.zip.iter().cloned().collect();
        // Requests from the previous session settle without touching the new flag.
        self.favicon_loading = false;
        self.pending_init = true;
        tracing::debug!(?kind, session = self.session, "card dialog opened");
        self.visible = true;
    }

    /// Same as [`CardDialogVm::open`] for callers holding an untyped record.
    pub fn open_seed(&mut self, seed: CardForm) {
        self.open(DialogMode::from_seed(seed));
    }

    /// Post-render continuation of `open`. Returns false when there was nothing
    /// pending.
    pub fn settle(&mut self, collaborators: &DialogCollaborators) -> bool {
        if !(self.visible && self.pending_init) {
            return false;
        }
        self.pending_init = false;
        self.errors.clear();
        collaborators.category.init();
        collaborators.icon.init(self.form.icon.as_ref());
        true
    }

    pub fn cancel(&mut self) {
        self.visible = false;
    }

    // ─── Field edits ──────────────────────────────────────────────────────────

    pub fn apply(&mut self, edit: FormEdit) {
        match edit {
            FormEdit::SetType(card_type) => self.set_type(card_type),
            FormEdit::SetCategory(category) => self.form.category = category,
            FormEdit::SetTitle(title) => self.form.title = title,
            FormEdit::SetContent(content) => self.form.content = content,
            FormEdit::SetPrivateContent(content) => self.form.private_content = content,
            FormEdit::SetUrl(url) => self.form.url = url,
            FormEdit::SetShowQrcode(show) => self.form.show_qrcode = show,
            FormEdit::Blur(field) => {
                if rules_for(Trigger::Blur).any(|f| f == field) {
                    self.errors.revalidate(&self.form, field);
                }
            }
            FormEdit::IconChanged(icon) => self.icon_change(icon),
            FormEdit::ArchiveUploaded { path, file_name } => {
                self.zip_file_upload_success(path, file_name);
            }
            FormEdit::ArchiveRemoved => self.zip_file_remove(),
        }
    }

    fn set_type(&mut self, card_type: CardType) {
        if !card_type.is_selectable() {
            tracing::warn!(card_type = card_type.as_str(), "card type is not selectable");
            return;
        }
        if self.form.card_type == card_type {
            return;
        }
        self.form.card_type = card_type;
        self.form.zip = None;
        self.archive_list.clear();
        self.errors.remove(FormField::Zip);
    }

    /// The icon picker reported a new value; only the icon rule is re-run.
    pub fn icon_change(&mut self, icon: Option<IconRef>) {
        self.form.icon = icon;
        self.errors.revalidate(&self.form, FormField::Icon);
    }

    pub fn zip_file_upload_success(&mut self, path: String, file_name: String) {
        let archive = ArchiveRef::uploaded(path, file_name);
        self.archive_list = vec![archive.clone()];
        self.form.zip = Some(archive);
        self.errors.revalidate(&self.form, FormField::Zip);
    }

    pub fn zip_file_remove(&mut self) {
        self.form.zip = None;
        self.archive_list.clear();
    }

    /// Queue an upload of a picked archive. Only zip cards of an open dialog take one.
    #[must_use]
    pub fn begin_archive_upload(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Option<ArchiveUpload> {
        if !(self.visible && self.form.is_zip()) {
            return None;
        }
        Some(ArchiveUpload {
            file_name,
            bytes,
            session: self.session,
        })
    }

    /// Attach the uploaded archive. Failures are reported; uploads finishing after
    /// the dialog was reopened are dropped. Returns true when the archive was attached.
    pub fn finish_archive_upload(
        &mut self,
        outcome: ArchiveUploadOutcome,
        notifier: &dyn Notifier,
    ) -> bool {
        let path = match outcome.result {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    file_name = %outcome.file_name,
                    "archive upload failed"
                );
                notifier.msg_error(&err.to_string());
                return false;
            }
        };
        if outcome.session != self.session || !self.form.is_zip() {
            tracing::debug!(
                file_name = %outcome.file_name,
                "dropping archive from an earlier dialog session"
            );
            return false;
        }
        self.zip_file_upload_success(path, outcome.file_name);
        true
    }

    // ─── Submission ───────────────────────────────────────────────────────────

    /// Validate and snapshot the form. `None` leaves the dialog open with the
    /// inline errors populated.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        self.errors = validate_form(&self.form);
        if !self.errors.is_empty() {
            tracing::debug!(invalid = self.errors.len(), "card submission blocked");
            return None;
        }
        // The icon picker may report after the rules ran.
        if !self.form.has_icon() {
            return None;
        }
        let category = self.form.category.clone()?;
        Some(SubmitTicket {
            payload: self.form.clone(),
            category,
            extracts_archive: self.form.needs_archive_extraction(),
            session: self.session,
        })
    }

    /// Apply a settled save. Returns true when the card was saved.
    pub fn finish_submit(
        &mut self,
        outcome: SubmitOutcome,
        collaborators: &DialogCollaborators,
    ) -> bool {
        match outcome.result {
            Ok(()) => {
                collaborators.notifier.msg_success(SAVED_NOTICE);
                if outcome.session == self.session {
                    self.visible = false;
                }
                collaborators.refresh.refresh(&outcome.category);
                tracing::info!(category = %outcome.category, "card saved");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "card save failed");
                collaborators.notifier.msg_error(&err.to_string());
                false
            }
        }
    }

    /// Validate, save and apply the result in one go.
    pub async fn submit_form(
        &mut self,
        gateway: &dyn CardGateway,
        collaborators: &DialogCollaborators,
    ) -> SubmitStatus {
        let Some(ticket) = self.begin_submit() else {
            return SubmitStatus::Blocked;
        };
        let outcome = ticket.run(gateway, collaborators.notifier.as_ref()).await;
        if self.finish_submit(outcome, collaborators) {
            SubmitStatus::Saved
        } else {
            SubmitStatus::Failed
        }
    }

    // ─── Icon discovery ───────────────────────────────────────────────────────

    /// Raise the favicon spinner for an `http` URL; anything else is a no-op.
    pub fn begin_favicon_discovery(&mut self) -> Option<FaviconRequest> {
        if !has_discoverable_url(&self.form.url) {
            return None;
        }
        self.favicon_loading = true;
        Some(FaviconRequest {
            url: self.form.url.clone(),
            session: self.session,
        })
    }

    /// Clear the spinner and forward candidates in response order. Results for
    /// an earlier session are dropped. Returns how many candidates were forwarded.
    pub fn finish_favicon_discovery(
        &mut self,
        response: FaviconResponse,
        icon: &dyn IconSelector,
    ) -> usize {
        if response.session != self.session {
            tracing::debug!(
                stale = response.session,
                current = self.session,
                "dropping icon candidates from an earlier dialog session"
            );
            return 0;
        }
        self.favicon_loading = false;
        let candidates = match response.result {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!(error = %err, "icon discovery failed");
                return 0;
            }
        };
        for url in &candidates {
            icon.supply_candidate(url);
        }
        if !candidates.is_empty() {
            self.icon_change(icon.selected());
        }
        candidates.len()
    }

    pub async fn get_favicons(
        &mut self,
        gateway: &dyn CardGateway,
        icon: &dyn IconSelector,
    ) -> usize {
        let Some(request) = self.begin_favicon_discovery() else {
            return 0;
        };
        let response = request.run(gateway).await;
        self.finish_favicon_discovery(response, icon)
    }

    // ─── Accessors ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    #[must_use]
    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    #[must_use]
    pub fn is_apply(&self) -> bool {
        self.is_apply
    }

    #[must_use]
    pub fn form(&self) -> &CardForm {
        &self.form
    }

    #[must_use]
    pub fn archive_list(&self) -> &[ArchiveRef] {
        &self.archive_list
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub fn favicon_loading(&self) -> bool {
        self.favicon_loading
    }

    #[must_use]
    pub fn pending_init(&self) -> bool {
        self.pending_init
    }

    #[must_use]
    pub fn session(&self) -> u64 {
        self.session
    }
}

impl SubmitTicket {
    #[must_use]
    pub fn payload(&self) -> &CardForm {
        &self.payload
    }

    #[must_use]
    pub fn extracts_archive(&self) -> bool {
        self.extracts_archive
    }

    /// Send the snapshot. The extraction overlay, when needed, is raised before
    /// the request and closed once it settles.
    pub async fn run(self, gateway: &dyn CardGateway, notifier: &dyn Notifier) -> SubmitOutcome {
        let _overlay = self
            .extracts_archive
            .then(|| LoadingGuard::raise(notifier, EXTRACTION_NOTICE));
        let result = gateway.save(&self.payload).await;
        SubmitOutcome {
            category: self.category,
            session: self.session,
            result,
        }
    }
}

impl ArchiveUpload {
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub async fn run(
        self,
        gateway: &dyn CardGateway,
        notifier: &dyn Notifier,
    ) -> ArchiveUploadOutcome {
        let _overlay = LoadingGuard::raise(notifier, UPLOAD_NOTICE);
        let result = gateway.upload_archive(&self.file_name, self.bytes).await;
        ArchiveUploadOutcome {
            file_name: self.file_name,
            session: self.session,
            result,
        }
    }
}

/// Offer the server's default icon set to the picker. Returns how many were offered.
pub async fn load_default_icons(gateway: &dyn CardGateway, icon: &dyn IconSelector) -> usize {
    match gateway.default_icons().await {
        Ok(sources) => {
            let icons: Vec<IconRef> = sources.into_iter().map(IconRef::new).collect();
            icon.offer_defaults(&icons);
            icons.len()
        }
        Err(err) => {
            tracing::warn!(error = %err, "default icons unavailable");
            0
        }
    }
}

impl FaviconRequest {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn run(self, gateway: &dyn CardGateway) -> FaviconResponse {
        let result = gateway.discover_icons(&self.url).await;
        FaviconResponse {
            session: self.session,
            result,
        }
    }
}
