mod card_dialog;

pub use card_dialog::{CardDialogProps, CardDialogView, DialogChrome, Toast};
