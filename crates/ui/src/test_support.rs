use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hub_core::model::{CardForm, CategoryId, IconRef};
use services::{CardApiError, CardGateway};

use crate::collaborators::{
    CategorySelector, DialogCollaborators, IconSelector, Notifier, RefreshSink,
};

/// Ordered trace of every collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CategoryInit,
    IconInit(Option<String>),
    IconCandidate(String),
    IconDefaults(usize),
    Loading(String),
    CloseLoading,
    Success(String),
    Error(String),
    Refresh(String),
    Save(CardForm),
    Discover(String),
    Upload(String),
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    pub fn push(&self, event: Event) {
        self.0.lock().expect("recorder lock").push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().expect("recorder lock").clone()
    }

    pub fn count(&self, wanted: &Event) -> usize {
        self.events().iter().filter(|event| *event == wanted).count()
    }

    pub fn position(&self, wanted: &Event) -> Option<usize> {
        self.events().iter().position(|event| event == wanted)
    }

    pub fn saves(&self) -> Vec<CardForm> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Save(card) => Some(card),
                _ => None,
            })
            .collect()
    }

    pub fn discoveries(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, Event::Discover(_)))
            .count()
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Ok,
    Fail,
    Panic,
}

/// Scripted backend: replies are consumed in order, defaulting to success.
pub struct MockGateway {
    recorder: Recorder,
    save_replies: Mutex<VecDeque<Reply>>,
    icons: Mutex<Option<Vec<String>>>,
    defaults: Vec<String>,
    upload_reply: Mutex<Option<Reply>>,
}

impl MockGateway {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            save_replies: Mutex::new(VecDeque::new()),
            icons: Mutex::new(Some(Vec::new())),
            defaults: Vec::new(),
            upload_reply: Mutex::new(None),
        }
    }

    pub fn with_save_reply(self, reply: Reply) -> Self {
        self.save_replies
            .lock()
            .expect("replies lock")
            .push_back(reply);
        self
    }

    pub fn with_defaults(mut self, icons: &[&str]) -> Self {
        self.defaults = icons.iter().map(|s| (*s).to_string()).collect();
        self
    }

    pub fn with_upload_reply(self, reply: Reply) -> Self {
        *self.upload_reply.lock().expect("upload lock") = Some(reply);
        self
    }

    /// `None` makes discovery fail.
    pub fn with_icons(self, icons: Option<&[&str]>) -> Self {
        *self.icons.lock().expect("icons lock") =
            icons.map(|list| list.iter().map(|s| (*s).to_string()).collect());
        self
    }
}

#[async_trait]
impl CardGateway for MockGateway {
    async fn save(&self, card: &CardForm) -> Result<(), CardApiError> {
        self.recorder.push(Event::Save(card.clone()));
        tokio::task::yield_now().await;
        let reply = self
            .save_replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or(Reply::Ok);
        match reply {
            Reply::Ok => Ok(()),
            Reply::Fail => Err(CardApiError::Unavailable("backend down".into())),
            Reply::Panic => panic!("save collaborator blew up"),
        }
    }

    async fn discover_icons(&self, url: &str) -> Result<Vec<String>, CardApiError> {
        self.recorder.push(Event::Discover(url.to_string()));
        tokio::task::yield_now().await;
        self.icons
            .lock()
            .expect("icons lock")
            .clone()
            .ok_or_else(|| CardApiError::Unavailable("discovery down".into()))
    }

    async fn default_icons(&self) -> Result<Vec<String>, CardApiError> {
        Ok(self.defaults.clone())
    }

    async fn upload_archive(
        &self,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, CardApiError> {
        self.recorder.push(Event::Upload(file_name.to_string()));
        tokio::task::yield_now().await;
        let reply = self
            .upload_reply
            .lock()
            .expect("upload lock")
            .take()
            .unwrap_or(Reply::Ok);
        match reply {
            Reply::Ok => Ok(format!("/ext-resources/modules/{file_name}")),
            Reply::Fail => Err(CardApiError::Unavailable("upload down".into())),
            Reply::Panic => panic!("upload collaborator blew up"),
        }
    }
}

pub struct RecordingWidgets {
    recorder: Recorder,
    selected: Mutex<Option<IconRef>>,
}

impl CategorySelector for RecordingWidgets {
    fn init(&self) {
        self.recorder.push(Event::CategoryInit);
    }
}

impl IconSelector for RecordingWidgets {
    fn init(&self, current: Option<&IconRef>) {
        self.recorder
            .push(Event::IconInit(current.map(|icon| icon.as_str().to_string())));
        *self.selected.lock().expect("selection lock") = current.cloned();
    }

    fn supply_candidate(&self, url: &str) {
        self.recorder.push(Event::IconCandidate(url.to_string()));
        *self.selected.lock().expect("selection lock") = Some(IconRef::new(url));
    }

    fn offer_defaults(&self, icons: &[IconRef]) {
        self.recorder.push(Event::IconDefaults(icons.len()));
    }

    fn selected(&self) -> Option<IconRef> {
        self.selected.lock().expect("selection lock").clone()
    }
}

impl Notifier for RecordingWidgets {
    fn loading(&self, message: &str) {
        self.recorder.push(Event::Loading(message.to_string()));
    }

    fn close_loading(&self) {
        self.recorder.push(Event::CloseLoading);
    }

    fn msg_success(&self, message: &str) {
        self.recorder.push(Event::Success(message.to_string()));
    }

    fn msg_error(&self, message: &str) {
        self.recorder.push(Event::Error(message.to_string()));
    }
}

impl RefreshSink for RecordingWidgets {
    fn refresh(&self, category: &CategoryId) {
        self.recorder.push(Event::Refresh(category.as_str().to_string()));
    }
}

pub fn recording_collaborators(recorder: &Recorder) -> DialogCollaborators {
    let widgets = Rc::new(RecordingWidgets {
        recorder: recorder.clone(),
        selected: Mutex::new(None),
    });
    DialogCollaborators {
        category: widgets.clone(),
        icon: widgets.clone(),
        notifier: widgets.clone(),
        refresh: widgets,
    }
}

/// A card that passes every rule.
pub fn complete_card(category: &str) -> CardForm {
    CardForm {
        title: "Rust".into(),
        content: "The book".into(),
        icon: Some(IconRef::new("/icons/rust.png")),
        ..CardForm::blank_in(CategoryId::new(category))
    }
}
