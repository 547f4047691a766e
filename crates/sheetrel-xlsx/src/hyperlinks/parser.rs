use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{HyperlinkOptions, RefInput, TargetKind};
use crate::relationships::{parse_relationships, Relationship, REL_TYPE_HYPERLINK};
use crate::XlsxError;

/// A `<hyperlink>` element read back from a worksheet part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedHyperlink {
    /// The `r:id` the element carried, if any.
    pub rel_id: Option<String>,
    /// Attributes ready to be re-added with [`crate::Worksheet::add_hyperlink`].
    pub options: HyperlinkOptions,
}

/// Parse the `<hyperlink>` elements of a worksheet XML part.
///
/// External targets are resolved through `rels_xml` (the worksheet's `.rels` part). A
/// hyperlink carrying both `r:id` and `location` is read as external with the location
/// appended as a `#` fragment.
pub fn parse_worksheet_hyperlinks(
    sheet_xml: &str,
    rels_xml: Option<&str>,
) -> Result<Vec<ParsedHyperlink>, XlsxError> {
    let rels: BTreeMap<String, Relationship> = rels_xml
        .map(parse_relationships)
        .transpose()?
        .unwrap_or_default()
        .into_iter()
        .collect();

    let mut reader = Reader::from_str(sheet_xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut out = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"hyperlink" => {
                out.push(parse_hyperlink_element(&e, &rels)?);
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

fn parse_hyperlink_element(
    e: &BytesStart<'_>,
    rels: &BTreeMap<String, Relationship>,
) -> Result<ParsedHyperlink, XlsxError> {
    let mut reference = None;
    let mut rel_id = None;
    let mut location = None;
    let mut options = HyperlinkOptions::default();

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        // The relationships namespace prefix is usually `r`, but any prefix is valid.
        if attr.key.prefix().is_some() {
            if attr.key.local_name().as_ref() == b"id" {
                rel_id = Some(value);
            }
            continue;
        }
        match attr.key.as_ref() {
            b"ref" => reference = Some(value),
            b"location" => location = Some(value),
            b"display" => options.display = Some(value),
            b"tooltip" => options.tooltip = Some(value),
            _ => {}
        }
    }

    let reference = reference.ok_or(XlsxError::MissingAttr("ref"))?;

    match (&rel_id, location) {
        (Some(rid), location) => {
            let rel = rels.get(rid).ok_or_else(|| {
                XlsxError::Hyperlink(format!("hyperlink {reference} references missing relationship {rid}"))
            })?;
            if rel.ty != REL_TYPE_HYPERLINK {
                return Err(XlsxError::Hyperlink(format!(
                    "relationship {rid} has unexpected Type {} (expected hyperlink)",
                    rel.ty
                )));
            }
            let target = match location {
                Some(fragment) => format!("{}#{fragment}", rel.target),
                None => rel.target.clone(),
            };
            options.location = Some(target);
            options.target = Some(TargetKind::External);
        }
        (None, Some(location)) => {
            options.location = Some(location);
            options.target = Some(TargetKind::Internal);
        }
        (None, None) => {
            return Err(XlsxError::Hyperlink(format!(
                "hyperlink {reference} missing location or r:id"
            )));
        }
    }

    options.reference = Some(RefInput::Raw(reference));
    Ok(ParsedHyperlink { rel_id, options })
}
