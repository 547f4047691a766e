//! Worksheet cell hyperlinks (`<hyperlink>` inside `<hyperlinks>`).
//!
//! External targets (URLs, files) are not written inline: the worksheet's `.rels` part
//! carries the target and the `<hyperlink>` element refers to it by `r:id`. Internal
//! targets (`Sheet2!A1`, defined names) are written directly as `location`.

mod options;
mod parser;
mod writer;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use sheetrel_model::{CellRef, Range, WorksheetId};

use crate::relationships::{
    relationship_id, Relationship, RelationshipSourceId, REL_TYPE_HYPERLINK,
};
use crate::worksheet::RelationshipOwner;
use crate::XlsxError;

pub use options::HyperlinkOptions;
pub use parser::{parse_worksheet_hyperlinks, ParsedHyperlink};
pub use writer::write_hyperlinks;

/// Where a hyperlink points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Outside the package. Resolved through a relationship.
    #[default]
    External,
    /// A sheet/cell or defined name within the same workbook.
    Internal,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::External => "External",
            TargetKind::Internal => "Internal",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = XlsxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("external") {
            Ok(TargetKind::External)
        } else if s.eq_ignore_ascii_case("internal") {
            Ok(TargetKind::Internal)
        } else {
            Err(XlsxError::InvalidTarget(s.to_string()))
        }
    }
}

/// A value accepted for the hyperlink's cell reference.
///
/// Cell-like values are flattened to their A1 text when assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefInput {
    Raw(String),
    Cell(CellRef),
    Range(Range),
}

impl RefInput {
    pub fn into_reference(self) -> String {
        match self {
            RefInput::Raw(s) => s,
            RefInput::Cell(cell) => cell.to_a1(),
            RefInput::Range(range) => range.to_a1(),
        }
    }
}

impl From<&str> for RefInput {
    fn from(value: &str) -> Self {
        RefInput::Raw(value.to_string())
    }
}

impl From<String> for RefInput {
    fn from(value: String) -> Self {
        RefInput::Raw(value)
    }
}

impl From<CellRef> for RefInput {
    fn from(value: CellRef) -> Self {
        RefInput::Cell(value)
    }
}

impl From<Range> for RefInput {
    fn from(value: Range) -> Self {
        RefInput::Range(value)
    }
}

/// A hyperlink attached to a cell (or range) of a worksheet.
///
/// The hyperlink does not own its worksheet. It keeps the worksheet id and the
/// relationship source handle the worksheet allocated for it, and every operation that
/// needs the worksheet's relationship numbering takes the worksheet as an argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorksheetHyperlink {
    worksheet: WorksheetId,
    source: RelationshipSourceId,
    target: TargetKind,
    display: Option<String>,
    location: Option<String>,
    tooltip: Option<String>,
    reference: Option<String>,
}

impl WorksheetHyperlink {
    /// Create a hyperlink owned by `worksheet`.
    ///
    /// Prefer [`crate::Worksheet::add_hyperlink`], which also registers the hyperlink so
    /// it takes part in the worksheet's relationship numbering.
    pub fn new<W>(worksheet: &mut W, options: HyperlinkOptions) -> Self
    where
        W: RelationshipOwner + ?Sized,
    {
        let mut link = Self {
            worksheet: worksheet.worksheet_id(),
            source: worksheet.allocate_source(),
            target: TargetKind::External,
            display: None,
            location: None,
            tooltip: None,
            reference: None,
        };
        link.apply(options);
        link
    }

    /// Like [`WorksheetHyperlink::new`], then hands the hyperlink to `customize` before
    /// returning it.
    pub fn new_with<W, F>(worksheet: &mut W, options: HyperlinkOptions, customize: F) -> Self
    where
        W: RelationshipOwner + ?Sized,
        F: FnOnce(&mut Self),
    {
        let mut link = Self::new(worksheet, options);
        customize(&mut link);
        link
    }

    fn apply(&mut self, options: HyperlinkOptions) {
        let HyperlinkOptions {
            display,
            location,
            tooltip,
            reference,
            target,
        } = options;

        if let Some(display) = display {
            self.set_display(display);
        }
        if let Some(location) = location {
            self.set_location(location);
        }
        if let Some(tooltip) = tooltip {
            self.set_tooltip(tooltip);
        }
        if let Some(reference) = reference {
            self.set_ref(reference);
        }
        if let Some(target) = target {
            self.set_target(target);
        }
    }

    pub fn worksheet(&self) -> WorksheetId {
        self.worksheet
    }

    pub fn source(&self) -> RelationshipSourceId {
        self.source
    }

    pub fn target(&self) -> TargetKind {
        self.target
    }

    pub fn is_external(&self) -> bool {
        self.target == TargetKind::External
    }

    /// Display string, if different from the cell text.
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// For external links this is the URI written to the relationship; for internal
    /// links it is the in-workbook location (`Sheet2!A1`, a defined name, ...).
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// The cell or range this hyperlink is attached to, in A1 notation.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn set_display(&mut self, display: impl Into<String>) {
        self.display = Some(display.into());
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) {
        self.tooltip = Some(tooltip.into());
    }

    pub fn set_target(&mut self, target: TargetKind) {
        self.target = target;
    }

    pub fn set_ref(&mut self, reference: impl Into<RefInput>) {
        self.reference = Some(reference.into().into_reference());
    }

    /// Assign one attribute from an untyped JSON value.
    ///
    /// Returns `Ok(false)` if `name` is not a hyperlink attribute. On error the
    /// hyperlink is left unchanged.
    pub fn set_attribute(
        &mut self,
        name: &str,
        value: &serde_json::Value,
    ) -> Result<bool, XlsxError> {
        let mut options = HyperlinkOptions::default();
        if !options.set_attribute(name, value)? {
            return Ok(false);
        }
        self.apply(options);
        Ok(true)
    }

    /// The relationship this hyperlink contributes to its worksheet's `.rels` part.
    ///
    /// `None` for internal hyperlinks, which are written inline.
    pub fn relationship(&self) -> Option<Relationship> {
        if !self.is_external() {
            return None;
        }
        Some(Relationship::external(REL_TYPE_HYPERLINK, self.external_target()))
    }

    /// The `r:id` of this hyperlink's relationship within `worksheet`.
    ///
    /// Derived from the current position in the worksheet's relationship list on every
    /// call, so it follows tables, comments and other hyperlinks added later.
    pub fn id<W>(&self, worksheet: &W) -> Option<String>
    where
        W: RelationshipOwner + ?Sized,
    {
        if !self.is_external() {
            return None;
        }

        if worksheet.worksheet_id() != self.worksheet {
            log::warn!(
                "hyperlink {} belongs to worksheet {}, not worksheet {}",
                self.reference().unwrap_or_default(),
                self.worksheet,
                worksheet.worksheet_id()
            );
            return None;
        }

        let Some(index) = worksheet.relationships_index_of(self.source) else {
            log::warn!(
                "hyperlink {} is not registered with worksheet {}",
                self.reference().unwrap_or_default(),
                self.worksheet
            );
            return None;
        };

        let id = relationship_id(index);
        log::trace!("hyperlink {} -> {id}", self.reference().unwrap_or_default());
        Some(id)
    }

    fn external_target(&self) -> String {
        match &self.location {
            Some(location) => location.clone(),
            None => {
                log::warn!(
                    "external hyperlink {} has no location; relationship target will be empty",
                    self.reference().unwrap_or_default()
                );
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Worksheet;

    #[test]
    fn target_kind_parses_case_insensitively() {
        assert_eq!("external".parse::<TargetKind>().unwrap(), TargetKind::External);
        assert_eq!(" Internal ".parse::<TargetKind>().unwrap(), TargetKind::Internal);
        assert!(matches!(
            "workbook".parse::<TargetKind>(),
            Err(XlsxError::InvalidTarget(s)) if s == "workbook"
        ));
    }

    #[test]
    fn cell_like_refs_are_flattened() {
        let mut ws = Worksheet::new(1, "Sheet1");
        let mut link = WorksheetHyperlink::new(&mut ws, HyperlinkOptions::default());

        link.set_ref(CellRef::new(1, 2));
        assert_eq!(link.reference(), Some("C2"));

        link.set_ref(Range::new(CellRef::new(0, 0), CellRef::new(3, 1)));
        assert_eq!(link.reference(), Some("A1:B4"));

        link.set_ref("anything");
        assert_eq!(link.reference(), Some("anything"));
    }

    #[test]
    fn customizer_runs_before_return() {
        let mut ws = Worksheet::new(1, "Sheet1");
        let link = WorksheetHyperlink::new_with(
            &mut ws,
            HyperlinkOptions::new().with_ref("A1"),
            |link| link.set_tooltip("hi"),
        );
        assert_eq!(link.tooltip(), Some("hi"));
        assert_eq!(link.reference(), Some("A1"));
    }

    #[test]
    fn foreign_worksheet_yields_no_id() {
        let mut home = Worksheet::new(1, "Home");
        let away = Worksheet::new(2, "Away");
        let link = home.add_hyperlink(HyperlinkOptions::new().with_location("https://a")).clone();

        assert_eq!(link.id(&home).as_deref(), Some("rId1"));
        assert_eq!(link.id(&away), None);
    }

    #[test]
    fn unregistered_hyperlink_yields_no_id() {
        let mut ws = Worksheet::new(1, "Sheet1");
        let link = WorksheetHyperlink::new(&mut ws, HyperlinkOptions::default());
        assert_eq!(link.id(&ws), None);
    }
}
