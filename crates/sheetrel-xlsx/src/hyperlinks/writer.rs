use super::{TargetKind, WorksheetHyperlink};
use crate::worksheet::RelationshipOwner;
use crate::xml::push_escaped_attr;

impl WorksheetHyperlink {
    /// Attribute name/value pairs for the `<hyperlink>` element, in output order.
    ///
    /// `display`, `ref` and `tooltip` appear only when set. External hyperlinks then get
    /// `r:id`; internal ones get `location`. Never both.
    pub fn serialization_values<W>(&self, worksheet: &W) -> Vec<(&'static str, String)>
    where
        W: RelationshipOwner + ?Sized,
    {
        let mut values = Vec::with_capacity(4);
        if let Some(display) = &self.display {
            values.push(("display", display.clone()));
        }
        if let Some(reference) = &self.reference {
            values.push(("ref", reference.clone()));
        }
        if let Some(tooltip) = &self.tooltip {
            values.push(("tooltip", tooltip.clone()));
        }

        match self.target {
            TargetKind::External => {
                values.push(("r:id", self.id(worksheet).unwrap_or_default()));
            }
            TargetKind::Internal => {
                let location = self.location.clone().unwrap_or_else(|| {
                    log::warn!(
                        "internal hyperlink {} has no location",
                        self.reference().unwrap_or_default()
                    );
                    String::new()
                });
                values.push(("location", location));
            }
        }
        values
    }

    /// Append this hyperlink as a self-closing `<hyperlink ... />` element to `buf`.
    pub fn to_xml_string<'a, W>(&self, worksheet: &W, buf: &'a mut String) -> &'a mut String
    where
        W: RelationshipOwner + ?Sized,
    {
        buf.push_str("<hyperlink ");
        for (key, value) in self.serialization_values(worksheet) {
            buf.push_str(key);
            buf.push_str("=\"");
            push_escaped_attr(buf, &value);
            buf.push_str("\" ");
        }
        buf.push_str("/>");
        buf
    }
}

/// Append a `<hyperlinks>` block for `links` to `buf`. Writes nothing when `links` is
/// empty, since an empty `<hyperlinks/>` is not schema-valid.
pub fn write_hyperlinks<'a, W>(
    worksheet: &W,
    links: &[WorksheetHyperlink],
    buf: &'a mut String,
) -> &'a mut String
where
    W: RelationshipOwner + ?Sized,
{
    if links.is_empty() {
        return buf;
    }

    buf.push_str("<hyperlinks>");
    for link in links {
        link.to_xml_string(worksheet, buf);
    }
    buf.push_str("</hyperlinks>");
    buf
}
