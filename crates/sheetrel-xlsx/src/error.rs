use sheetrel_model::WorksheetId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("invalid value for hyperlink attribute `{attribute}`: expected {expected}, found {found}")]
    InvalidType {
        attribute: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid hyperlink target `{0}` (expected External or Internal)")]
    InvalidTarget(String),
    #[error("hyperlink belongs to worksheet {found}, not worksheet {expected}")]
    ForeignWorksheet {
        expected: WorksheetId,
        found: WorksheetId,
    },
    #[error("hyperlink attributes must be a JSON object, found {0}")]
    InvalidOptions(&'static str),
    #[error("missing required attribute: {0}")]
    MissingAttr(&'static str),
    #[error("hyperlink error: {0}")]
    Hyperlink(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("xml attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Short JSON type name used in [`XlsxError::InvalidType`] messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
