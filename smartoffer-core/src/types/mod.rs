//! Domain view-model types

mod rfq;
mod settings;

pub use rfq::{
    DEFAULT_SEND_ERROR, MANUAL_SUPPLIER_NAME, RequestStatus, RfqRequest, SendOutcome, Supplier,
    SupplierStatus, UNNAMED_SUPPLIER, default_subject, derive_send_outcome,
};
pub use settings::{
    AUTH_TOKEN_STORAGE_KEY, AppSettings, DEFAULT_EMAIL_TEMPLATE, SETTINGS_STORAGE_KEY,
    TemplateVars,
};
