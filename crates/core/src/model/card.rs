use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::ids::{CardId, CategoryId};

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// What a card carries besides its text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Plain link/text card.
    #[default]
    Default,
    /// Static website served from an uploaded zip archive.
    Zip,
    /// File attachment card. Not offered in the editor.
    File,
}

impl CardType {
    /// Catalogue in display order.
    pub const ALL: [CardType; 3] = [CardType::Default, CardType::Zip, CardType::File];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CardType::Default => "Default",
            CardType::Zip => "Static site",
            CardType::File => "File",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Default => "default",
            CardType::Zip => "zip",
            CardType::File => "file",
        }
    }

    /// `File` is permanently disabled in the type picker.
    #[must_use]
    pub fn is_selectable(self) -> bool {
        !matches!(self, CardType::File)
    }
}

/// Uploaded archive backing a `zip` card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRef {
    pub name: String,
    pub path: String,
    /// Set only for an archive uploaded during the current session; the server
    /// has to extract it on save.
    #[serde(default)]
    pub is_new: bool,
}

impl ArchiveRef {
    /// Reference produced by a successful upload in this session.
    #[must_use]
    pub fn uploaded(path: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: file_name.into(),
            path: path.into(),
            is_new: true,
        }
    }

    /// Reference to an archive the server already stores.
    #[must_use]
    pub fn stored(path: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: file_name.into(),
            path: path.into(),
            is_new: false,
        }
    }
}

/// Uploaded (or discovered) image asset used as the card icon.
///
/// Travels as an object (`{"src": "..."}`) both ways.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconRef {
    #[serde(default, deserialize_with = "string_or_null")]
    pub src: String,
}

impl IconRef {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.src
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.src.trim().is_empty()
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.src)
    }
}

//
// ─── CARD FORM ─────────────────────────────────────────────────────────────────
//

/// Editable content of the card dialog, also the save payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CardId>,
    #[serde(rename = "type", default)]
    pub card_type: CardType,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub content: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub private_content: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub url: String,
    #[serde(default)]
    pub show_qrcode: bool,
    #[serde(default)]
    pub icon: Option<IconRef>,
    #[serde(default)]
    pub zip: Option<ArchiveRef>,
}

impl CardForm {
    /// Default-typed empty card.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Default-typed empty card filed under `category`.
    #[must_use]
    pub fn blank_in(category: CategoryId) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_zip(&self) -> bool {
        self.card_type == CardType::Zip
    }

    /// True when saving this form makes the server unpack a freshly uploaded archive.
    #[must_use]
    pub fn needs_archive_extraction(&self) -> bool {
        self.is_zip() && self.zip.as_ref().is_some_and(|zip| zip.is_new)
    }

    #[must_use]
    pub fn has_icon(&self) -> bool {
        self.icon.as_ref().is_some_and(|icon| !icon.is_blank())
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Icon discovery only runs for addresses with an `http` scheme prefix.
#[must_use]
pub fn has_discoverable_url(url: &str) -> bool {
    !url.is_empty() && url.starts_with("http")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_is_never_selectable() {
        let selectable: Vec<_> = CardType::ALL
            .iter()
            .filter(|kind| kind.is_selectable())
            .collect();
        assert_eq!(selectable, vec![&CardType::Default, &CardType::Zip]);
    }

    #[test]
    fn blank_form_is_default_typed() {
        let form = CardForm::blank_in(CategoryId::new("tools"));
        assert_eq!(form.card_type, CardType::Default);
        assert_eq!(form.category, Some(CategoryId::new("tools")));
        assert!(form.id.is_none());
        assert!(form.icon.is_none());
    }

    #[test]
    fn extraction_requires_zip_type_and_new_archive() {
        let mut form = CardForm::blank();
        form.zip = Some(ArchiveRef::uploaded("/ext/site.zip", "site.zip"));
        assert!(!form.needs_archive_extraction());

        form.card_type = CardType::Zip;
        assert!(form.needs_archive_extraction());

        form.zip = Some(ArchiveRef::stored("/ext/site.zip", "site.zip"));
        assert!(!form.needs_archive_extraction());

        form.zip = None;
        assert!(!form.needs_archive_extraction());
    }

    #[test]
    fn form_serializes_with_wire_names() {
        let mut form = CardForm::blank_in(CategoryId::new("c1"));
        form.card_type = CardType::Zip;
        form.title = "Docs".into();
        form.show_qrcode = true;
        form.zip = Some(ArchiveRef::uploaded("/ext/a.zip", "a.zip"));
        form.icon = Some(IconRef::new("/a.png"));

        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["type"], "zip");
        assert_eq!(value["category"], "c1");
        assert_eq!(value["showQrcode"], true);
        assert_eq!(value["privateContent"], "");
        assert_eq!(value["zip"]["isNew"], true);
        assert_eq!(value["icon"], serde_json::json!({"src": "/a.png"}));
        assert!(value.get("id").is_none());
    }

    #[test]
    fn stored_record_deserializes_with_nulls() {
        let raw = r#"{
            "id": "abc",
            "type": "zip",
            "category": "c1",
            "title": "Docs",
            "content": "body",
            "privateContent": null,
            "url": null,
            "showQrcode": false,
            "icon": {"src": "/ext-resources/images/default/docs.png"},
            "zip": {"name": "site.zip", "path": "/ext/site.zip"},
            "sort": 3
        }"#;
        let form: CardForm = serde_json::from_str(raw).unwrap();
        assert_eq!(form.id, Some(CardId::new("abc")));
        assert_eq!(form.private_content, "");
        assert_eq!(form.url, "");
        assert_eq!(
            form.icon,
            Some(IconRef::new("/ext-resources/images/default/docs.png"))
        );
        assert!(!form.zip.unwrap().is_new);
    }

    #[test]
    fn icon_object_round_trips_through_wire_shape() {
        let icon: IconRef = serde_json::from_str(r#"{"src": "/a.png"}"#).unwrap();
        assert_eq!(icon.as_str(), "/a.png");
        assert!(IconRef::new("   ").is_blank());

        let blank: IconRef = serde_json::from_str(r#"{"src": null}"#).unwrap();
        assert!(blank.is_blank());
        assert!(serde_json::from_str::<IconRef>(r#""/a.png""#).is_err());
    }

    #[test]
    fn discoverable_url_needs_http_prefix() {
        assert!(has_discoverable_url("http://example.com"));
        assert!(has_discoverable_url("https://example.com"));
        assert!(!has_discoverable_url("ftp://example.com"));
        assert!(!has_discoverable_url(""));
        assert!(!has_discoverable_url("example.com"));
    }
}
