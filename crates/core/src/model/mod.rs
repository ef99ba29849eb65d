mod card;
mod ids;
mod mode;

pub use card::{ArchiveRef, CardForm, CardType, IconRef, has_discoverable_url};
pub use ids::{CardId, CategoryId, ParseIdError};
pub use mode::{DialogKind, DialogMode};
