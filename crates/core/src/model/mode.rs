use crate::model::card::CardForm;
use crate::model::ids::CategoryId;

/// How the card dialog was entered. Built once by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    /// Edit a persisted card; carries the stored record.
    Edit(Box<CardForm>),
    /// Create a card under a known category.
    CreateInCategory(CategoryId),
    /// Anonymous request for a new card.
    ApplyNew,
}

/// Payload-free discriminant of [`DialogMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Edit,
    CreateInCategory,
    ApplyNew,
}

impl DialogMode {
    /// Classify an ad-hoc record: an identifier wins over a category, and a
    /// record with neither is an application.
    #[must_use]
    pub fn from_seed(seed: CardForm) -> Self {
        if seed.id.as_ref().is_some_and(|id| !id.as_str().trim().is_empty()) {
            return DialogMode::Edit(Box::new(seed));
        }
        match seed.category {
            Some(category) if !category.is_blank() => DialogMode::CreateInCategory(category),
            _ => DialogMode::ApplyNew,
        }
    }

    #[must_use]
    pub fn kind(&self) -> DialogKind {
        match self {
            DialogMode::Edit(_) => DialogKind::Edit,
            DialogMode::CreateInCategory(_) => DialogKind::CreateInCategory,
            DialogMode::ApplyNew => DialogKind::ApplyNew,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.kind().title()
    }

    #[must_use]
    pub fn is_apply(&self) -> bool {
        matches!(self, DialogMode::ApplyNew)
    }

    /// Fresh form content for a new dialog session.
    #[must_use]
    pub fn into_form(self) -> CardForm {
        match self {
            DialogMode::Edit(record) => *record,
            DialogMode::CreateInCategory(category) => CardForm::blank_in(category),
            DialogMode::ApplyNew => CardForm::blank(),
        }
    }
}

impl DialogKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            DialogKind::Edit => "Edit Card",
            DialogKind::CreateInCategory => "Create Card",
            DialogKind::ApplyNew => "Apply for Card",
        }
    }
}
