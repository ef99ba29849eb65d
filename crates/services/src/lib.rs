#![forbid(unsafe_code)]

pub mod card_gateway;
pub mod config;
pub mod error;

pub use card_gateway::{
    ARCHIVE_UPLOAD_ROUTE, CARD_ICON_ROUTE, CARD_ROUTE, CardGateway, DEFAULT_ICON_DIR,
    HttpCardGateway, default_icon_src, icon_candidates_from_json, upload_path_from_body,
};
pub use config::ApiConfig;
pub use error::CardApiError;
