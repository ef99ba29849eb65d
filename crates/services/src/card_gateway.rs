use async_trait::async_trait;
use hub_core::model::CardForm;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::CardApiError;

/// Create/update route. New cards are POSTed, cards carrying an `id` are PUT.
pub const CARD_ROUTE: &str = "/api/v1/card";
/// Icon route. With `?url=` it scrapes favicons, without it lists the default icon set.
pub const CARD_ICON_ROUTE: &str = "/api/v1/card/icon";
/// Site archive upload route; answers with the stored path.
pub const ARCHIVE_UPLOAD_ROUTE: &str = "/api/v1/upload/modules";
/// Where the server keeps the default icon set.
pub const DEFAULT_ICON_DIR: &str = "/ext-resources/images/default/";

/// Backend operations the card dialog depends on.
#[async_trait]
pub trait CardGateway: Send + Sync {
    /// Persist the card.
    ///
    /// # Errors
    ///
    /// Returns `CardApiError` on transport failures or non-success responses.
    async fn save(&self, card: &CardForm) -> Result<(), CardApiError>;

    /// Ask the backend to scrape candidate icon URLs from `url`.
    ///
    /// # Errors
    ///
    /// Returns `CardApiError` on transport failures or non-success responses.
    async fn discover_icons(&self, url: &str) -> Result<Vec<String>, CardApiError>;

    /// Icon sources of the server's default icon set.
    ///
    /// # Errors
    ///
    /// Returns `CardApiError` on transport failures or non-success responses.
    async fn default_icons(&self) -> Result<Vec<String>, CardApiError>;

    /// Upload a site archive and return the path the server stored it under.
    ///
    /// # Errors
    ///
    /// Returns `CardApiError::MissingUploadPath` when the server answers without a path.
    async fn upload_archive(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, CardApiError>;
}

#[derive(Clone)]
pub struct HttpCardGateway {
    client: Client,
    config: ApiConfig,
}

impl HttpCardGateway {
    /// # Errors
    ///
    /// Returns `CardApiError::InvalidBaseUrl` when the base URL is not http(s).
    pub fn new(config: ApiConfig) -> Result<Self, CardApiError> {
        let base = config.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CardApiError::InvalidBaseUrl(config.base_url));
        }
        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl CardGateway for HttpCardGateway {
    async fn save(&self, card: &CardForm) -> Result<(), CardApiError> {
        let url = self.config.endpoint(CARD_ROUTE);
        let request = if card.id.is_some() {
            self.client.put(url)
        } else {
            self.client.post(url)
        };
        let response = self.authorize(request).json(card).send().await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "card save rejected");
            return Err(CardApiError::HttpStatus(response.status()));
        }
        Ok(())
    }

    async fn discover_icons(&self, url: &str) -> Result<Vec<String>, CardApiError> {
        let request = self
            .client
            .get(self.config.endpoint(CARD_ICON_ROUTE))
            .query(&[("url", url)]);
        let response = self.authorize(request).send().await?;

        if !response.status().is_success() {
            return Err(CardApiError::HttpStatus(response.status()));
        }

        let body: Value = response.json().await?;
        let candidates = icon_candidates_from_json(&body);
        tracing::debug!(count = candidates.len(), "icon candidates discovered");
        Ok(candidates)
    }

    async fn default_icons(&self) -> Result<Vec<String>, CardApiError> {
        let request = self.client.get(self.config.endpoint(CARD_ICON_ROUTE));
        let response = self.authorize(request).send().await?;

        if !response.status().is_success() {
            return Err(CardApiError::HttpStatus(response.status()));
        }

        let body: Value = response.json().await?;
        Ok(icon_candidates_from_json(&body)
            .iter()
            .map(|name| default_icon_src(name))
            .collect())
    }

    async fn upload_archive(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, CardApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/zip")?;
        let request = self
            .client
            .post(self.config.endpoint(ARCHIVE_UPLOAD_ROUTE))
            .multipart(Form::new().part("file", part));
        let response = self.authorize(request).send().await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), file_name, "archive upload rejected");
            return Err(CardApiError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let path = upload_path_from_body(&body).ok_or(CardApiError::MissingUploadPath)?;
        tracing::debug!(file_name, %path, "site archive uploaded");
        Ok(path)
    }
}

/// The default icon listing holds bare file names; turn them into icon sources.
#[must_use]
pub fn default_icon_src(name: &str) -> String {
    if name.starts_with('/') || name.starts_with("http") {
        name.to_string()
    } else {
        format!("{DEFAULT_ICON_DIR}{name}")
    }
}

/// The upload route answers with the stored path, either bare or as a JSON string.
#[must_use]
pub fn upload_path_from_body(body: &str) -> Option<String> {
    let path = match serde_json::from_str::<Value>(body) {
        Ok(Value::String(path)) => path,
        Ok(_) => return None,
        Err(_) => body.trim().to_string(),
    };
    (!path.trim().is_empty()).then_some(path)
}

/// Decode the discovery response. Anything but an array of strings means
/// "no results".
#[must_use]
pub fn icon_candidates_from_json(body: &Value) -> Vec<String> {
    let Some(items) = body.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| item.as_str().map(str::to_owned))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_of_strings_keeps_order() {
        let body = json!(["b.png", "a.png", "c.ico"]);
        assert_eq!(
            icon_candidates_from_json(&body),
            vec!["b.png", "a.png", "c.ico"]
        );
    }

    #[test]
    fn other_shapes_mean_no_results() {
        assert!(icon_candidates_from_json(&json!(null)).is_empty());
        assert!(icon_candidates_from_json(&json!({"icons": ["a.png"]})).is_empty());
        assert!(icon_candidates_from_json(&json!("a.png")).is_empty());
        assert!(icon_candidates_from_json(&json!(["a.png", 3])).is_empty());
        assert!(icon_candidates_from_json(&json!([])).is_empty());
    }

    #[test]
    fn default_icon_names_resolve_under_icon_dir() {
        assert_eq!(
            default_icon_src("github.png"),
            "/ext-resources/images/default/github.png"
        );
        assert_eq!(default_icon_src("/custom/a.png"), "/custom/a.png");
        assert_eq!(default_icon_src("https://x.io/a.png"), "https://x.io/a.png");
    }

    #[test]
    fn upload_path_accepts_bare_or_quoted_body() {
        assert_eq!(
            upload_path_from_body("/ext-resources/modules/20240101/abc.zip").as_deref(),
            Some("/ext-resources/modules/20240101/abc.zip")
        );
        assert_eq!(
            upload_path_from_body(r#""/ext-resources/modules/x.zip""#).as_deref(),
            Some("/ext-resources/modules/x.zip")
        );
        assert_eq!(upload_path_from_body(""), None);
        assert_eq!(upload_path_from_body(r#""  ""#), None);
        assert_eq!(upload_path_from_body(r#"{"path":"/a.zip"}"#), None);
    }

    #[test]
    fn gateway_rejects_non_http_base_url() {
        let config = ApiConfig::default().with_base_url("ftp://hub.example.com");
        let err = HttpCardGateway::new(config).err().unwrap();
        assert!(matches!(err, CardApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn gateway_keeps_config() {
        let config = ApiConfig::default().with_token(Some("t".into()));
        let gateway = HttpCardGateway::new(config.clone()).unwrap();
        assert_eq!(gateway.config(), &config);
    }
}
