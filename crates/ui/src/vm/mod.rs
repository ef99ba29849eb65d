mod card_dialog_vm;
mod category_vm;

pub use card_dialog_vm::{
    ArchiveUpload, ArchiveUploadOutcome, CardDialogVm, EXTRACTION_NOTICE, FaviconRequest,
    FaviconResponse, FormEdit, SAVED_NOTICE, SubmitOutcome, SubmitStatus, SubmitTicket,
    UPLOAD_NOTICE, load_default_icons,
};
pub use category_vm::{CategoryOptionVm, category_from_value};
