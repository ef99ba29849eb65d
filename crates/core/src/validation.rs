//! Declarative field rules for the card form.
//!
//! Rules are evaluated all at once on a submission attempt, and one field at a
//! time from the field's own trigger (blur for text inputs, change for the icon
//! picker, upload completion for the archive).

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::CardForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Category,
    Title,
    Content,
    Icon,
    Zip,
}

/// UI event that re-runs a single field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Blur,
    Change,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: FormField,
    pub trigger: Trigger,
}

pub const RULES: [FieldRule; 5] = [
    FieldRule {
        field: FormField::Category,
        trigger: Trigger::Blur,
    },
    FieldRule {
        field: FormField::Title,
        trigger: Trigger::Blur,
    },
    FieldRule {
        field: FormField::Content,
        trigger: Trigger::Blur,
    },
    FieldRule {
        field: FormField::Icon,
        trigger: Trigger::Change,
    },
    FieldRule {
        field: FormField::Zip,
        trigger: Trigger::Submit,
    },
];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Category is required.")]
    MissingCategory,
    #[error("Title is required.")]
    MissingTitle,
    #[error("Content is required.")]
    MissingContent,
    #[error("Please add an icon.")]
    MissingIcon,
    #[error("Please upload the site zip file.")]
    MissingArchive,
}

/// Fields whose rule fires on `trigger`.
pub fn rules_for(trigger: Trigger) -> impl Iterator<Item = FormField> {
    RULES
        .into_iter()
        .filter(move |rule| rule.trigger == trigger)
        .map(|rule| rule.field)
}

/// Run the rule of a single field.
///
/// # Errors
///
/// Returns the `FieldError` describing why `field` is not acceptable.
pub fn validate_field(form: &CardForm, field: FormField) -> Result<(), FieldError> {
    let ok = match field {
        FormField::Category => form.category.as_ref().is_some_and(|c| !c.is_blank()),
        FormField::Title => !form.title.trim().is_empty(),
        FormField::Content => !form.content.trim().is_empty(),
        FormField::Icon => form.has_icon(),
        FormField::Zip => !form.is_zip() || form.zip.is_some(),
    };
    if ok {
        return Ok(());
    }
    Err(match field {
        FormField::Category => FieldError::MissingCategory,
        FormField::Title => FieldError::MissingTitle,
        FormField::Content => FieldError::MissingContent,
        FormField::Icon => FieldError::MissingIcon,
        FormField::Zip => FieldError::MissingArchive,
    })
}

/// Run every declared rule.
#[must_use]
pub fn validate_form(form: &CardForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for rule in RULES {
        errors.revalidate(form, rule.field);
    }
    errors
}

/// Inline error state, one message per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FormField, FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn message(&self, field: FormField) -> Option<String> {
        self.get(field).map(|err| err.to_string())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Record `error` for `field`, replacing any previous message.
    pub fn set(&mut self, field: FormField, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn remove(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    /// Re-run one rule, replacing whatever state the field had.
    pub fn revalidate(&mut self, form: &CardForm, field: FormField) {
        match validate_field(form, field) {
            Ok(()) => {
                self.0.remove(&field);
            }
            Err(err) => self.set(field, err),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, FieldError)> + '_ {
        self.0.iter().map(|(field, err)| (*field, *err))
    }
}
