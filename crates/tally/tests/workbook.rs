// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.
use std::io::{Cursor, Write};
use tally::data::{ColumnData, DataType};
use tally::{DataError, EngineConfig, FilterSpec, SurveyEngine, TallyError, XlsxLoader};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};
const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Responses" sheetId="1" r:id="rId1"/><sheet name="Notes" sheetId="2" r:id="rId2"/></sheets></workbook>"#;
const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/></Relationships>"#;
const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;
const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/worksheets/sheet2.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;
fn inline(cell: &str, text: &str) -> String {
    format!(r#"<c r="{cell}" t="inlineStr"><is><t>{text}</t></is></c>"#)
}
fn number(cell: &str, value: &str) -> String {
    format!(r#"<c r="{cell}"><v>{value}</v></c>"#)
}
fn sheet(rows: &[Vec<String>]) -> String {
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(i, cells)| format!(r#"<row r="{}">{}</row>"#, i + 1, cells.concat()))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{body}</sheetData></worksheet>"#
    )
}
fn survey_workbook() -> tempfile::NamedTempFile {
    let responses = sheet(&[
        vec![
            inline("A1", "Tahun graduasi anda?"),
            inline("B1", "Jantina anda?"),
            inline("C1", "Adakah anda kini bekerja?"),
        ],
        vec![number("A2", "2023"), inline("B2", "Lelaki"), inline("C2", "Ya")],
        vec![number("A3", "2023"), inline("C3", "Tidak")],
        vec![number("A4", "2024"), inline("B4", "Perempuan"), inline("C4", "Ya")],
    ]);
    let notes = sheet(&[vec![inline("A1", "Catatan")], vec![inline("A2", "pilot batch")]]);
    let cursor = Cursor::new(Vec::new());
    let mut writer = ZipWriter::new(cursor);
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Stored);
    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", WORKBOOK.to_string()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", responses),
        ("xl/worksheets/sheet2.xml", notes),
    ];
    for (name, body) in parts {
        writer.start_file(name, options).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    let bytes = writer.finish().unwrap().into_inner();
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(&bytes).unwrap();
    file
}
#[test]
fn first_sheet_feeds_the_same_type_inference() {
    let file = survey_workbook();
    let table = XlsxLoader::new().load_path(file.path()).unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(
        table.column_names(),
        &["Tahun graduasi anda?", "Jantina anda?", "Adakah anda kini bekerja?"]
    );
    let year = table.get_column("Tahun graduasi anda?").unwrap();
    assert_eq!(year.data_type(), DataType::Int64);
    assert_eq!(year.get_string(0).as_deref(), Some("2023"));
    assert_eq!(table.get_column("Jantina anda?").unwrap().null_count(), 1);
    assert!(table.metadata.source_path.is_some());
}
#[test]
fn named_sheet_and_row_limit_are_honoured() {
    let file = survey_workbook();
    let notes = XlsxLoader::new().with_sheet("Notes").load_path(file.path()).unwrap();
    assert_eq!(notes.column_names(), &["Catatan"]);
    let limited = XlsxLoader::new().with_row_limit(2).load_path(file.path()).unwrap();
    assert_eq!(limited.row_count(), 2);
}
#[test]
fn engine_load_dispatches_on_the_workbook_extension() {
    let file = survey_workbook();
    let engine = SurveyEngine::load(file.path(), EngineConfig::default()).unwrap();
    let kpis = engine.kpis(&FilterSpec::new().with("graduation_year", ["2023"]));
    assert_eq!(kpis.total_records, 2);
    assert_eq!(kpis.employment_rate, 50.0);
}
#[test]
fn unreadable_workbook_is_a_data_error() {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(b"Tahun graduasi anda?,Jantina anda?\n2023,Lelaki\n").unwrap();
    let err = SurveyEngine::load(file.path(), EngineConfig::default()).unwrap_err();
    assert!(matches!(err, TallyError::Data(DataError::Workbook { .. })));
    let missing = XlsxLoader::new().with_sheet("Tiada").load_path(survey_workbook().path());
    assert!(matches!(missing, Err(TallyError::Data(DataError::Workbook { .. }))));
}
