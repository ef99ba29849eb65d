use hub_core::model::CategoryId;

/// Entry of the category drop-down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryOptionVm {
    pub id: CategoryId,
    pub label: String,
}

impl CategoryOptionVm {
    #[must_use]
    pub fn new(id: CategoryId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Resolve the raw `<select>` value back into a category reference.
#[must_use]
pub fn category_from_value(options: &[CategoryOptionVm], value: &str) -> Option<CategoryId> {
    options
        .iter()
        .find(|opt| opt.id.as_str() == value)
        .map(|opt| opt.id.clone())
}
