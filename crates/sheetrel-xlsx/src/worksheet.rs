//! The worksheet side of relationship numbering.
//!
//! A worksheet part has one `.rels` list shared by everything that needs a relationship:
//! tables, comments, external hyperlinks and the drawing. [`Worksheet`] owns those
//! entities and is the single place that decides their order in the list.

use sheetrel_model::WorksheetId;

use crate::hyperlinks::{write_hyperlinks, HyperlinkOptions, WorksheetHyperlink};
use crate::relationships::{
    Relationship, RelationshipSourceId, Relationships, REL_TYPE_COMMENTS, REL_TYPE_DRAWING,
    REL_TYPE_TABLE, REL_TYPE_VML_DRAWING,
};
use crate::XlsxError;

/// Capability required of anything that owns hyperlinks.
pub trait RelationshipOwner {
    fn worksheet_id(&self) -> WorksheetId;

    /// Hand out a fresh handle for a relationship-producing entity.
    fn allocate_source(&mut self) -> RelationshipSourceId;

    /// Zero-based position of `source`'s first relationship in the owner's complete
    /// relationship list, or `None` if `source` currently contributes none.
    fn relationships_index_of(&self, source: RelationshipSourceId) -> Option<usize>;
}

/// A part referenced from the worksheet through a single internal relationship.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartLink {
    pub source: RelationshipSourceId,
    pub target: String,
}

/// Cell comments need two relationships: the legacy VML drawing and the comments part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentsLink {
    pub source: RelationshipSourceId,
    pub comments_target: String,
    pub vml_target: String,
}

#[derive(Clone, Debug)]
pub struct Worksheet {
    id: WorksheetId,
    name: String,
    next_source: u64,
    tables: Vec<PartLink>,
    comments: Option<CommentsLink>,
    hyperlinks: Vec<WorksheetHyperlink>,
    drawing: Option<PartLink>,
}

impl Worksheet {
    pub fn new(id: WorksheetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            next_source: 0,
            tables: Vec::new(),
            comments: None,
            hyperlinks: Vec::new(),
            drawing: None,
        }
    }

    pub fn id(&self) -> WorksheetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a hyperlink built from `options` and return it.
    pub fn add_hyperlink(&mut self, options: HyperlinkOptions) -> &mut WorksheetHyperlink {
        let link = WorksheetHyperlink::new(self, options);
        self.push_registered(link)
    }

    /// Like [`Worksheet::add_hyperlink`], running `customize` on the new hyperlink first.
    pub fn add_hyperlink_with<F>(
        &mut self,
        options: HyperlinkOptions,
        customize: F,
    ) -> &mut WorksheetHyperlink
    where
        F: FnOnce(&mut WorksheetHyperlink),
    {
        let link = WorksheetHyperlink::new_with(self, options, customize);
        self.push_registered(link)
    }

    /// Register a hyperlink created with [`WorksheetHyperlink::new`] against this worksheet.
    pub fn push_hyperlink(
        &mut self,
        link: WorksheetHyperlink,
    ) -> Result<&mut WorksheetHyperlink, XlsxError> {
        if link.worksheet() != self.id {
            return Err(XlsxError::ForeignWorksheet {
                expected: self.id,
                found: link.worksheet(),
            });
        }
        // The source must come from this worksheet's allocator and be unclaimed. A clone
        // shares the original's allocation history, so the worksheet id is not enough.
        if link.source().get() >= self.next_source || self.source_in_use(link.source()) {
            return Err(XlsxError::Hyperlink(format!(
                "hyperlink {} has a relationship source not available in worksheet {}",
                link.reference().unwrap_or_default(),
                self.id
            )));
        }
        Ok(self.push_registered(link))
    }

    fn source_in_use(&self, source: RelationshipSourceId) -> bool {
        self.relationship_counts().any(|(s, _)| s == source)
    }

    fn push_registered(&mut self, link: WorksheetHyperlink) -> &mut WorksheetHyperlink {
        let idx = self.hyperlinks.len();
        self.hyperlinks.push(link);
        &mut self.hyperlinks[idx]
    }

    pub fn hyperlinks(&self) -> &[WorksheetHyperlink] {
        &self.hyperlinks
    }

    pub fn hyperlinks_mut(&mut self) -> &mut [WorksheetHyperlink] {
        &mut self.hyperlinks
    }

    pub fn clear_hyperlinks(&mut self) {
        self.hyperlinks.clear();
    }

    pub fn add_table(&mut self, target: impl Into<String>) -> RelationshipSourceId {
        let source = self.allocate_source();
        self.tables.push(PartLink {
            source,
            target: target.into(),
        });
        source
    }

    pub fn set_comments(
        &mut self,
        comments_target: impl Into<String>,
        vml_target: impl Into<String>,
    ) -> RelationshipSourceId {
        let source = self.allocate_source();
        self.comments = Some(CommentsLink {
            source,
            comments_target: comments_target.into(),
            vml_target: vml_target.into(),
        });
        source
    }

    pub fn set_drawing(&mut self, target: impl Into<String>) -> RelationshipSourceId {
        let source = self.allocate_source();
        self.drawing = Some(PartLink {
            source,
            target: target.into(),
        });
        source
    }

    /// Every relationship of this worksheet part, in `rId` order.
    pub fn relationships(&self) -> Relationships {
        let mut rels = Relationships::new();
        for table in &self.tables {
            rels.push(
                table.source,
                Relationship::internal(REL_TYPE_TABLE, table.target.as_str()),
            );
        }
        if let Some(comments) = &self.comments {
            rels.push(
                comments.source,
                Relationship::internal(REL_TYPE_VML_DRAWING, comments.vml_target.as_str()),
            );
            rels.push(
                comments.source,
                Relationship::internal(REL_TYPE_COMMENTS, comments.comments_target.as_str()),
            );
        }
        for link in &self.hyperlinks {
            if let Some(rel) = link.relationship() {
                rels.push(link.source(), rel);
            }
        }
        if let Some(drawing) = &self.drawing {
            rels.push(
                drawing.source,
                Relationship::internal(REL_TYPE_DRAWING, drawing.target.as_str()),
            );
        }
        rels
    }

    // Mirrors the order of `relationships` without building the list.
    fn relationship_counts(&self) -> impl Iterator<Item = (RelationshipSourceId, usize)> + '_ {
        let tables = self.tables.iter().map(|t| (t.source, 1));
        let comments = self.comments.iter().map(|c| (c.source, 2));
        let links = self
            .hyperlinks
            .iter()
            .map(|l| (l.source(), usize::from(l.is_external())));
        let drawing = self.drawing.iter().map(|d| (d.source, 1));
        tables.chain(comments).chain(links).chain(drawing)
    }

    /// The worksheet's `.rels` part, or `None` when it has no relationships.
    pub fn relationships_xml(&self) -> Result<Option<String>, XlsxError> {
        let rels = self.relationships();
        if rels.is_empty() {
            return Ok(None);
        }
        rels.to_xml_string().map(Some)
    }

    /// Append the `<hyperlinks>` block (nothing if there are no hyperlinks) to `buf`.
    pub fn hyperlinks_xml<'a>(&self, buf: &'a mut String) -> &'a mut String {
        write_hyperlinks(self, &self.hyperlinks, buf)
    }
}

impl RelationshipOwner for Worksheet {
    fn worksheet_id(&self) -> WorksheetId {
        self.id
    }

    fn allocate_source(&mut self) -> RelationshipSourceId {
        // u64: not exhaustible in practice, so handles are never reused.
        let source = RelationshipSourceId::new(self.next_source);
        self.next_source += 1;
        source
    }

    fn relationships_index_of(&self, source: RelationshipSourceId) -> Option<usize> {
        let mut index = 0;
        for (s, count) in self.relationship_counts() {
            if s == source {
                return (count > 0).then_some(index);
            }
            index += count;
        }
        None
    }
}
