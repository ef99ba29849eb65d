use std::sync::Arc;

use hub_core::model::CategoryId;
use services::CardGateway;

use crate::vm::CategoryOptionVm;

pub trait UiApp: Send + Sync {
    fn card_gateway(&self) -> Arc<dyn CardGateway>;
    fn categories(&self) -> Vec<CategoryOptionVm>;
    fn default_category(&self) -> Option<CategoryId>;
}

#[derive(Clone)]
pub struct AppContext {
    gateway: Arc<dyn CardGateway>,
    categories: Vec<CategoryOptionVm>,
    default_category: Option<CategoryId>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            gateway: app.card_gateway(),
            categories: app.categories(),
            default_category: app.default_category(),
        }
    }

    #[must_use]
    pub fn gateway(&self) -> Arc<dyn CardGateway> {
        Arc::clone(&self.gateway)
    }

    #[must_use]
    pub fn categories(&self) -> &[CategoryOptionVm] {
        &self.categories
    }

    /// Category new cards are filed under; falls back to the first listed one.
    #[must_use]
    pub fn default_category(&self) -> Option<CategoryId> {
        self.default_category
            .clone()
            .or_else(|| self.categories.first().map(|opt| opt.id.clone()))
    }
}

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(&app)
}
