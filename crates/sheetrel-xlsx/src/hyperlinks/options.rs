use serde::Deserialize;
use serde_json::Value;
use sheetrel_model::{CellRef, Range};

use super::{RefInput, TargetKind};
use crate::error::json_type_name;
use crate::XlsxError;

/// Attributes applied to a [`super::WorksheetHyperlink`] at construction.
///
/// Unset fields leave the hyperlink's defaults in place (no display/location/tooltip/ref,
/// target [`TargetKind::External`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HyperlinkOptions {
    pub display: Option<String>,
    pub location: Option<String>,
    pub tooltip: Option<String>,
    pub reference: Option<RefInput>,
    pub target: Option<TargetKind>,
}

impl HyperlinkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_ref(mut self, reference: impl Into<RefInput>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = Some(target);
        self
    }

    /// Build options from a JSON attribute map such as
    /// `{"ref": "A1", "location": "https://example.com", "tooltip": "Open"}`.
    ///
    /// Unknown keys are ignored. `ref` also accepts a cell object (`{"row": 0, "col": 0}`)
    /// or a range object (`{"start": {..}, "end": {..}}`).
    pub fn from_json(value: &Value) -> Result<Self, XlsxError> {
        let map = value
            .as_object()
            .ok_or_else(|| XlsxError::InvalidOptions(json_type_name(value)))?;

        let mut options = Self::default();
        for (name, value) in map {
            if !options.set_attribute(name, value)? {
                log::debug!("ignoring unknown hyperlink attribute `{name}`");
            }
        }
        Ok(options)
    }

    /// Validate and store a single named attribute. Returns `Ok(false)` for unknown names.
    pub(crate) fn set_attribute(&mut self, name: &str, value: &Value) -> Result<bool, XlsxError> {
        match name {
            "display" => self.display = Some(expect_string("display", value)?),
            "location" => self.location = Some(expect_string("location", value)?),
            "tooltip" => self.tooltip = Some(expect_string("tooltip", value)?),
            "ref" => self.reference = Some(ref_input(value)?),
            "target" => self.target = Some(expect_string("target", value)?.parse()?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn expect_string(attribute: &'static str, value: &Value) -> Result<String, XlsxError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(XlsxError::InvalidType {
            attribute,
            expected: "string",
            found: json_type_name(other),
        }),
    }
}

fn ref_input(value: &Value) -> Result<RefInput, XlsxError> {
    match value {
        Value::String(s) => return Ok(RefInput::Raw(s.clone())),
        Value::Object(_) => {
            if let Ok(cell) = CellRef::deserialize(value) {
                return Ok(RefInput::Cell(cell));
            }
            if let Ok(range) = Range::deserialize(value) {
                return Ok(RefInput::Range(range));
            }
        }
        _ => {}
    }
    Err(XlsxError::InvalidType {
        attribute: "ref",
        expected: "string or cell reference",
        found: json_type_name(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn reads_known_attributes() {
        let options = HyperlinkOptions::from_json(&json!({
            "display": "Docs",
            "location": "https://example.com/docs",
            "tooltip": "Open docs",
            "ref": "B2",
            "target": "external",
        }))
        .unwrap();

        assert_eq!(
            options,
            HyperlinkOptions::new()
                .with_display("Docs")
                .with_location("https://example.com/docs")
                .with_tooltip("Open docs")
                .with_ref("B2")
                .with_target(TargetKind::External)
        );
    }

    #[test]
    fn ignores_unknown_attributes() {
        let options =
            HyperlinkOptions::from_json(&json!({ "ref": "A1", "color": 7, "r:id": "rId9" })).unwrap();
        assert_eq!(options, HyperlinkOptions::new().with_ref("A1"));
    }

    #[test]
    fn accepts_cell_and_range_objects_for_ref() {
        let cell = HyperlinkOptions::from_json(&json!({ "ref": { "row": 4, "col": 1 } })).unwrap();
        assert_eq!(cell.reference, Some(RefInput::Cell(CellRef::new(4, 1))));

        let range = HyperlinkOptions::from_json(&json!({
            "ref": { "start": { "row": 0, "col": 0 }, "end": { "row": 1, "col": 1 } }
        }))
        .unwrap();
        assert_eq!(range.reference.map(RefInput::into_reference).as_deref(), Some("A1:B2"));
    }

    #[test]
    fn rejects_non_string_values() {
        for key in ["display", "location", "tooltip", "target"] {
            let mut attrs = serde_json::Map::new();
            attrs.insert(key.to_string(), json!(42));
            let err = HyperlinkOptions::from_json(&Value::Object(attrs)).unwrap_err();
            assert!(
                matches!(err, XlsxError::InvalidType { attribute, found: "number", .. } if attribute == key),
                "{key}: {err}"
            );
        }

        let err = HyperlinkOptions::from_json(&json!({ "ref": [1, 2] })).unwrap_err();
        assert!(matches!(err, XlsxError::InvalidType { attribute: "ref", found: "array", .. }));
    }

    #[test]
    fn rejects_unknown_target_kinds() {
        let err = HyperlinkOptions::from_json(&json!({ "target": "workbook" })).unwrap_err();
        assert!(matches!(err, XlsxError::InvalidTarget(_)));
    }

    #[test]
    fn rejects_non_object_configuration() {
        let err = HyperlinkOptions::from_json(&json!(["ref", "A1"])).unwrap_err();
        assert!(matches!(err, XlsxError::InvalidOptions("array")));
    }
}
