// ==========================================
// 电子表格导入 - 文件解析集成测试
// ==========================================
// 覆盖: CSV / Excel 文件 → 工作表 → 导入结果；格式识别与错误
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sheet_import::config::ImportOptions;
use sheet_import::domain::SheetRecord;
use sheet_import::importer::{
    ImportError, SheetImporter, SheetSource, UniversalFileParser, WorkbookFormat,
};
use std::path::PathBuf;
use test_helpers::{member_options, write_temp_file, Member};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

const MEMBERS_CSV: &str = "\
姓名,年龄,性别,状态,编号,入职日期,薪资
张三,30,男,1,AB123,2012-03-21,1000
,,,,,,
李四,abc,女,0,CD456,2013/1/2,2000
";

#[test]
fn test_import_csv_file() {
    let file = write_temp_file(".csv", MEMBERS_CSV);
    let importer = SheetImporter::new(member_options());

    let outcome = importer
        .import_file(file.path(), &Member::schema(), &ImportOptions::default())
        .unwrap();

    assert_eq!(outcome.records().len(), 1);
    assert_eq!(outcome.records()[0].row, 2);
    assert_eq!(outcome.records()[0].object.gender, "M");
    assert_eq!(outcome.errors().len(), 1);
    assert_eq!(outcome.errors()[0].row, 4);
    assert_eq!(outcome.errors()[0].column, "B");
}

#[test]
fn test_import_csv_bytes_with_format() {
    let importer = SheetImporter::new(member_options());
    let options = ImportOptions::default().with_format(WorkbookFormat::Csv);

    let outcome = importer
        .import_bytes(MEMBERS_CSV.as_bytes(), &Member::schema(), &options)
        .unwrap();

    assert_eq!(outcome.summary().success_rows, vec![2]);
    assert_eq!(outcome.summary().fail_rows, vec![4]);
}

#[test]
fn test_header_on_later_row() {
    let file = write_temp_file(".csv", "会员名单\n姓名,性别\n王五,女\n");
    let options = ImportOptions::default().with_rows(1, 2);

    let outcome = SheetImporter::new(member_options())
        .import_file(file.path(), &Member::schema(), &options)
        .unwrap();

    assert_eq!(outcome.records().len(), 1);
    assert_eq!(outcome.records()[0].row, 3);
}

#[test]
fn test_format_override_ignores_extension() {
    let file = write_temp_file(".txt", "姓名,性别\n王五,女\n");
    let options = ImportOptions::default().with_format(WorkbookFormat::Csv);

    let outcome = SheetImporter::new(member_options())
        .import_file(file.path(), &Member::schema(), &options)
        .unwrap();

    assert_eq!(outcome.records().len(), 1);
}

#[test]
fn test_unsupported_extension() {
    let file = write_temp_file(".txt", "姓名\n王五\n");
    let err = UniversalFileParser.parse_file(file.path(), None).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    assert!(!err.is_structural());
}

#[test]
fn test_missing_file() {
    let err = UniversalFileParser
        .parse_file("definitely_missing.xlsx", None)
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_corrupt_workbook_bytes() {
    let importer = SheetImporter::default();
    let result = importer.import_bytes(b"garbage", &Member::schema(), &ImportOptions::default());
    assert!(matches!(result, Err(ImportError::ExcelParseError(_))));

    let options = ImportOptions::default().with_format(WorkbookFormat::Xlsx);
    let result = importer.import_bytes(b"garbage", &Member::schema(), &options);
    assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
}

#[test]
fn test_csv_rows_of_uneven_length() {
    let file = write_temp_file(".csv", "a,b,c\n1\n1,2,3,4\n");
    let sheet = UniversalFileParser.parse_file(file.path(), None).unwrap();
    assert_eq!(sheet.row_len(0), 3);
    assert_eq!(sheet.row_len(1), 1);
    assert_eq!(sheet.row_len(2), 4);
    assert_eq!(sheet.last_row_index(), Some(2));
}

// ==========================================
// Excel 工作簿: tests/fixtures/members.xlsx
// ==========================================
// 行 1 表头；行 2 正常；行 3 空；行 4 年龄非法；行 5 入职日期为日期单元格
#[test]
fn test_import_xlsx_fixture() {
    let importer = SheetImporter::new(member_options());

    let outcome = importer
        .import_file(fixture("members.xlsx"), &Member::schema(), &ImportOptions::default())
        .unwrap();

    let rows: Vec<u32> = outcome.records().iter().map(|r| r.row).collect();
    assert_eq!(rows, vec![2, 5]);

    let first = &outcome.records()[0].object;
    assert_eq!(first.name, "张三");
    assert_eq!(first.age, 30);
    assert_eq!(first.gender, "M");
    assert_eq!(first.salary, Decimal::new(12345, 1));

    let last = &outcome.records()[1].object;
    assert_eq!(last.age, 45);
    assert_eq!(
        last.joined,
        NaiveDate::from_ymd_opt(2012, 4, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
    );

    assert_eq!(outcome.errors().len(), 1);
    assert_eq!(outcome.errors()[0].row, 4);
    assert_eq!(outcome.errors()[0].column, "B");
}

#[test]
fn test_import_xlsx_bytes_by_sheet_name() {
    let bytes = std::fs::read(fixture("members.xlsx")).unwrap();
    let options = ImportOptions::default()
        .with_format(WorkbookFormat::Xlsx)
        .with_sheet("会员");

    let outcome = SheetImporter::new(member_options())
        .import_bytes(&bytes, &Member::schema(), &options)
        .unwrap();

    assert_eq!(outcome.summary().success, 2);
    assert_eq!(outcome.summary().fail_rows, vec![4]);
}

#[test]
fn test_xlsx_unknown_sheet_name() {
    let sheet = UniversalFileParser.parse_file(fixture("members.xlsx"), Some("Sheet9"));
    assert!(matches!(sheet, Err(ImportError::SheetNotFound(name)) if name == "Sheet9"));
}

#[test]
fn test_xlsx_first_sheet_selected_by_default() {
    let sheet = UniversalFileParser.parse_file(fixture("members.xlsx"), None).unwrap();
    assert_eq!(sheet.name(), "会员");
    assert_eq!(sheet.last_row_index(), Some(4));
}
