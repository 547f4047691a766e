//! Worksheet hyperlinks and part relationships for SpreadsheetML (`.xlsx`) packages.
//!
//! - [`WorksheetHyperlink`]: a cell hyperlink, serialized as a `<hyperlink>` element.
//!   External targets get an `r:id` derived from the owning worksheet's relationship
//!   list; internal targets are written inline as `location`.
//! - [`Worksheet`]: owns the relationship-producing entities of one worksheet part and
//!   numbers their relationships.
//! - [`Relationships`]: the ordered relationship list and its `.rels` part.
//! - [`parse_worksheet_hyperlinks`]: reads `<hyperlink>` elements (plus the `.rels`
//!   part) back into [`HyperlinkOptions`].
//!
//! Diagnostics for caller mistakes that are not errors (an external hyperlink without a
//! `location`, a hyperlink asked for its id by the wrong worksheet) go through the `log`
//! facade.

mod error;
pub mod hyperlinks;
pub mod relationships;
mod worksheet;
mod xml;

pub use error::XlsxError;
pub use hyperlinks::{
    parse_worksheet_hyperlinks, write_hyperlinks, HyperlinkOptions, ParsedHyperlink, RefInput,
    TargetKind, WorksheetHyperlink,
};
pub use relationships::{
    parse_relationships, relationship_id, Relationship, RelationshipSourceId, Relationships,
    TargetMode, REL_TYPE_HYPERLINK,
};
pub use worksheet::{CommentsLink, PartLink, RelationshipOwner, Worksheet};
