mod common;

use std::io::Write;

use common::zip_bytes;
use roster_extract::xlsx::{read_rows, select_sheet};
use roster_extract::{Cell, Error};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn prefers_investor_view_sheet() {
    assert_eq!(select_sheet(&names(&["Meeting List", "Investor View", "Founders"])), Some(1));
    assert_eq!(select_sheet(&names(&["Summary", "INVESTOR - Day 2 view"])), Some(1));
    assert_eq!(select_sheet(&names(&["Investors", "Views"])), Some(0));
    assert_eq!(select_sheet(&[]), None);
}

fn inline_cell(r: &str, text: &str) -> String {
    format!(r#"<c r="{r}" t="inlineStr"><is><t>{text}</t></is></c>"#)
}

fn sheet_xml(rows: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
            "<sheetData>{rows}</sheetData></worksheet>",
        ),
        rows = rows
    )
}

const TIME_STYLES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#,
    r#"<xf numFmtId="20" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>"#,
    "</cellXfs></styleSheet>",
);

/// Two sheets; "Investor View" has its header at B3 and one assignment in
/// row 4 whose time slot cell is `time_cell`.
fn workbook_bytes(time_cell: &str, styles: Option<&str>) -> Vec<u8> {
    let workbook = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        r#"<sheets><sheet name="Notes" sheetId="1" r:id="rId1"/>"#,
        r#"<sheet name="Investor View" sheetId="2" r:id="rId2"/></sheets></workbook>"#,
    );
    let rels = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>"#,
        "</Relationships>",
    );
    let notes = sheet_xml(&format!(r#"<row r="1">{}</row>"#, inline_cell("A1", "ignore me")));
    let view = sheet_xml(&[
        format!(r#"<row r="2">{}</row>"#, inline_cell("B2", "Demo Day")),
        format!(
            r#"<row r="3">{}{}{}</row>"#,
            inline_cell("B3", "Investor (Fund)"),
            inline_cell("C3", "Room"),
            inline_cell("D3", "Timeslot"),
        ),
        format!(
            r#"<row r="4">{}<c r="C4"><v>7</v></c>{}</row>"#,
            inline_cell("B4", "AlphaFund"),
            time_cell,
        ),
    ]
    .concat());
    let content_types = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
        "</Types>",
    );
    let mut entries = vec![
        ("[Content_Types].xml", content_types.as_bytes()),
        ("xl/workbook.xml", workbook.as_bytes()),
        ("xl/_rels/workbook.xml.rels", rels.as_bytes()),
        ("xl/worksheets/sheet1.xml", notes.as_bytes()),
        ("xl/worksheets/sheet2.xml", view.as_bytes()),
    ];
    if let Some(styles) = styles {
        entries.push(("xl/styles.xml", styles.as_bytes()));
    }
    zip_bytes(&entries)
}

fn workbook_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn reads_preferred_sheet_at_absolute_positions() {
    let file = workbook_file(&workbook_bytes(&inline_cell("D4", "9:00 AM"), None));

    let sheet = read_rows(file.path()).unwrap();
    assert_eq!(sheet.sheet_name, "Investor View");
    assert_eq!(sheet.rows[1][1], Cell::Text("Demo Day".into()));
    assert_eq!(sheet.rows[3][2], Cell::Number(7.0));

    let (binding, assignments) = roster_extract::xlsx::parse_assignments(&sheet.rows).unwrap();
    assert_eq!(binding.header_row, 2);
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].fund, "AlphaFund");
    assert_eq!(assignments[0].investor_room, "7");
    assert_eq!(assignments[0].time_slot, "9:00 AM");
}

#[test]
fn time_formatted_cells_render_as_clock_time() {
    // 14:30 stored as a day fraction under the built-in "h:mm" format.
    let time_cell = r#"<c r="D4" s="1"><v>0.6041666666666666</v></c>"#;
    let file = workbook_file(&workbook_bytes(time_cell, Some(TIME_STYLES)));

    let sheet = read_rows(file.path()).unwrap();
    assert_eq!(sheet.rows[3][3], Cell::Text("14:30:00".into()));

    let (_, assignments) = roster_extract::xlsx::parse_assignments(&sheet.rows).unwrap();
    assert_eq!(assignments[0].time_slot, "14:30:00");
}

#[test]
fn date_formatted_cells_keep_their_date() {
    // 2025-03-01 09:15 under the built-in "m/d/yy h:mm" format.
    let styles = TIME_STYLES.replace(r#"numFmtId="20""#, r#"numFmtId="22""#);
    let time_cell = r#"<c r="D4" s="1"><v>45717.385416666664</v></c>"#;
    let file = workbook_file(&workbook_bytes(time_cell, Some(&styles)));

    let sheet = read_rows(file.path()).unwrap();
    assert_eq!(sheet.rows[3][3], Cell::Text("2025-03-01 09:15:00".into()));
}

#[test]
fn unreadable_workbook_is_an_error() {
    let file = workbook_file(b"not a workbook");
    assert!(matches!(read_rows(file.path()), Err(Error::Workbook(_))));
}
