use pretty_assertions::assert_eq;
use quick_xml::events::Event;
use quick_xml::Reader;
use sheetrel_xlsx::{
    parse_relationships, parse_worksheet_hyperlinks, HyperlinkOptions, TargetKind, Worksheet,
    WorksheetHyperlink, REL_TYPE_HYPERLINK,
};

fn sample_worksheet() -> Worksheet {
    let mut ws = Worksheet::new(1, "Sheet1");
    ws.add_table("../tables/table1.xml");
    ws.add_hyperlink(
        HyperlinkOptions::new()
            .with_ref("A1")
            .with_display("Search & Rescue")
            .with_tooltip("Say \"hi\"")
            .with_location("https://example.com/?q=a&lang=en"),
    );
    ws.add_hyperlink(
        HyperlinkOptions::new()
            .with_ref("B2:C3")
            .with_location("'My Sheet'!A1")
            .with_target(TargetKind::Internal),
    );
    ws.add_hyperlink(
        HyperlinkOptions::new()
            .with_ref("D4")
            .with_location("file:///C:/reports/q3.xlsx"),
    );
    ws
}

fn sheet_xml(ws: &Worksheet) -> String {
    let mut xml = String::from(concat!(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        r#"<sheetData/>"#,
    ));
    ws.hyperlinks_xml(&mut xml);
    xml.push_str("</worksheet>");
    xml
}

const HYPERLINK_ATTRIBUTES: [&[u8]; 5] = [b"display", b"ref", b"tooltip", b"location", b"r:id"];

type Attrs = (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    TargetKind,
);

fn attrs(link: &WorksheetHyperlink) -> Attrs {
    (
        link.reference().map(str::to_string),
        link.display().map(str::to_string),
        link.tooltip().map(str::to_string),
        link.location().map(str::to_string),
        link.target(),
    )
}

#[test]
fn emitted_fragment_is_well_formed_xml() {
    let ws = sample_worksheet();
    let xml = sheet_xml(&ws);

    let mut reader = Reader::from_str(&xml);
    let mut seen = 0;
    loop {
        match reader.read_event().expect("well-formed worksheet xml") {
            Event::Eof => break,
            Event::Empty(e) if e.name().as_ref() == b"hyperlink" => {
                for attr in e.attributes() {
                    let attr = attr.expect("valid attribute");
                    let key = attr.key.as_ref();
                    assert!(
                        HYPERLINK_ATTRIBUTES.contains(&key),
                        "unexpected attribute {:?}",
                        String::from_utf8_lossy(key)
                    );
                }
                seen += 1;
            }
            _ => {}
        }
    }
    assert_eq!(seen, 3);
}

#[test]
fn rels_part_matches_hyperlink_ids() {
    let ws = sample_worksheet();
    let rels_xml = ws.relationships_xml().unwrap().expect("worksheet has relationships");
    let rels = parse_relationships(&rels_xml).unwrap();

    assert_eq!(rels.len(), 3);
    for link in ws.hyperlinks().iter().filter(|l| l.is_external()) {
        let id = link.id(&ws).unwrap();
        let (_, rel) = rels.iter().find(|(rid, _)| *rid == id).unwrap();
        assert_eq!(rel.ty, REL_TYPE_HYPERLINK);
        assert_eq!(Some(rel.target.as_str()), link.location());
    }
}

#[test]
fn hyperlinks_survive_a_write_read_cycle() {
    let ws = sample_worksheet();
    let rels_xml = ws.relationships_xml().unwrap();
    let parsed = parse_worksheet_hyperlinks(&sheet_xml(&ws), rels_xml.as_deref()).unwrap();

    let rel_ids: Vec<Option<String>> = parsed.iter().map(|p| p.rel_id.clone()).collect();
    assert_eq!(
        rel_ids,
        vec![Some("rId2".to_string()), None, Some("rId3".to_string())]
    );

    let mut copy = Worksheet::new(7, "Copy");
    for link in parsed {
        copy.add_hyperlink(link.options);
    }

    let original: Vec<Attrs> = ws.hyperlinks().iter().map(attrs).collect();
    let reread: Vec<Attrs> = copy.hyperlinks().iter().map(attrs).collect();
    assert_eq!(reread, original);
}
