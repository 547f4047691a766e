//! Part relationships (`_rels/*.rels`).
//!
//! Every relationship-producing entity on a worksheet contributes entries to one shared
//! [`Relationships`] list. Ids are positional (`rId1`, `rId2`, ...), so an entity can
//! derive its own id from its index in that list without storing it.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};

use crate::XlsxError;

const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub const REL_TYPE_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
pub const REL_TYPE_TABLE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/table";
pub const REL_TYPE_COMMENTS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments";
pub const REL_TYPE_VML_DRAWING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/vmlDrawing";
pub const REL_TYPE_DRAWING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing";

/// `TargetMode` of a relationship. Absent means the target is a part inside the package.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetMode {
    External,
}

impl TargetMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetMode::External => "External",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    pub ty: String,
    pub target: String,
    pub target_mode: Option<TargetMode>,
}

impl Relationship {
    /// A relationship to another part in the same package.
    pub fn internal(ty: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            target: target.into(),
            target_mode: None,
        }
    }

    /// A relationship to a resource outside the package (URL, file path, ...).
    pub fn external(ty: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            target: target.into(),
            target_mode: Some(TargetMode::External),
        }
    }
}

/// Opaque handle identifying the entity that contributed a relationship.
///
/// Handles are allocated by the owning worksheet and never reused within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationshipSourceId(pub(crate) u64);

impl RelationshipSourceId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Format the id of the relationship at zero-based `index`.
pub fn relationship_id(index: usize) -> String {
    format!("rId{}", index + 1)
}

/// The ordered relationship list of a single part.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Relationships {
    entries: Vec<(RelationshipSourceId, Relationship)>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: RelationshipSourceId, relationship: Relationship) {
        self.entries.push((source, relationship));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Relationship> {
        self.entries.get(index).map(|(_, rel)| rel)
    }

    /// The `Id` of the relationship at zero-based `index` (`rId{index + 1}`).
    pub fn id_at(&self, index: usize) -> String {
        relationship_id(index)
    }

    /// Position of the first relationship contributed by `source`.
    pub fn index_of(&self, source: RelationshipSourceId) -> Option<usize> {
        self.entries.iter().position(|(s, _)| *s == source)
    }

    /// Iterate `(id, relationship)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &Relationship)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, (_, rel))| (self.id_at(idx), rel))
    }

    /// Render the complete `.rels` part.
    pub fn to_xml_string(&self) -> Result<String, XlsxError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut root = BytesStart::new("Relationships");
        root.push_attribute(("xmlns", NS_RELATIONSHIPS));
        writer.write_event(Event::Start(root))?;

        for (id, rel) in self.iter() {
            let mut elem = BytesStart::new("Relationship");
            elem.push_attribute(("Id", id.as_str()));
            elem.push_attribute(("Type", rel.ty.as_str()));
            elem.push_attribute(("Target", rel.target.as_str()));
            if let Some(mode) = rel.target_mode {
                elem.push_attribute(("TargetMode", mode.as_str()));
            }
            writer.write_event(Event::Empty(elem))?;
        }

        writer.write_event(Event::End(BytesEnd::new("Relationships")))?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

/// Read a `.rels` part into `(id, relationship)` pairs, in document order.
///
/// Entries without an `Id` are skipped. A `TargetMode` other than `External` is treated
/// as internal.
pub fn parse_relationships(rels_xml: &str) -> Result<Vec<(String, Relationship)>, XlsxError> {
    let mut reader = Reader::from_str(rels_xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut rels = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut rel = Relationship::internal(String::new(), String::new());

                for attr in e.attributes() {
                    let attr = attr?;
                    let value = attr.unescape_value()?.into_owned();
                    match attr.key.as_ref() {
                        b"Id" => id = Some(value),
                        b"Type" => rel.ty = value,
                        b"Target" => rel.target = value,
                        b"TargetMode" if value == "External" => {
                            rel.target_mode = Some(TargetMode::External)
                        }
                        _ => {}
                    }
                }

                if let Some(id) = id {
                    rels.push((id, rel));
                }
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_are_positional() {
        let mut rels = Relationships::new();
        rels.push(
            RelationshipSourceId::new(7),
            Relationship::internal(REL_TYPE_TABLE, "../tables/table1.xml"),
        );
        rels.push(
            RelationshipSourceId::new(3),
            Relationship::external(REL_TYPE_HYPERLINK, "https://example.com"),
        );

        let ids: Vec<String> = rels.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["rId1", "rId2"]);
        assert_eq!(rels.index_of(RelationshipSourceId::new(3)), Some(1));
        assert_eq!(rels.index_of(RelationshipSourceId::new(99)), None);
    }

    #[test]
    fn id_at_is_one_based() {
        let rels = Relationships::new();
        assert_eq!(rels.id_at(0), "rId1");
        assert_eq!(rels.id_at(41), "rId42");
        assert_eq!(rels.id_at(41), relationship_id(41));
    }

    #[test]
    fn renders_rels_part() {
        let mut rels = Relationships::new();
        rels.push(
            RelationshipSourceId::new(0),
            Relationship::external(REL_TYPE_HYPERLINK, "https://example.com/?a=1&b=2"),
        );

        let xml = rels.to_xml_string().unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
                r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>"#,
                r#"</Relationships>"#,
            )
        );
    }

    #[test]
    fn parses_rendered_part() {
        let mut rels = Relationships::new();
        rels.push(
            RelationshipSourceId::new(0),
            Relationship::internal(REL_TYPE_DRAWING, "../drawings/drawing1.xml"),
        );
        rels.push(
            RelationshipSourceId::new(1),
            Relationship::external(REL_TYPE_HYPERLINK, "file:///tmp/a b.txt"),
        );

        let parsed = parse_relationships(&rels.to_xml_string().unwrap()).unwrap();
        let expected: Vec<(String, Relationship)> =
            rels.iter().map(|(id, rel)| (id, rel.clone())).collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn empty_collection_renders_empty_root() {
        let xml = Relationships::new().to_xml_string().unwrap();
        assert!(xml.ends_with("<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\"></Relationships>"));
    }
}
