// ==========================================
// 电子表格导入 - 配置驱动导入集成测试
// ==========================================
// 覆盖: JSON 字段声明 + JSON 选项表 → Record 导入
// ==========================================

mod test_helpers;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use sheet_import::config::{ImportOptions, SchemaConfig};
use sheet_import::domain::{FieldValue, RowErrorKind};
use sheet_import::importer::{GridSheet, ImportError, OptionTable, SheetImporter};
use test_helpers::write_temp_file;

const SCHEMA_JSON: &str = r#"{
    "fields": [
        {"field": "sku", "column": "商品编码", "pattern": "[A-Z]{3}-\\d{4}"},
        {"field": "price", "column": "单价", "kind": "decimal"},
        {"field": "qty", "column": "数量", "kind": "long", "required": false},
        {"field": "unit", "column": "单位", "dropdown": "unit", "dropdown_mode": "translate"}
    ]
}"#;

const OPTIONS_JSON: &str = r#"{"unit": {"件": "PCS", "箱": "BOX"}}"#;

#[test]
fn test_config_driven_import() {
    let schema_file = write_temp_file(".json", SCHEMA_JSON);
    let options_file = write_temp_file(".json", OPTIONS_JSON);

    let schema = SchemaConfig::from_json_file(schema_file.path())
        .unwrap()
        .into_schema()
        .unwrap();
    let options = OptionTable::from_json_file(options_file.path()).unwrap();

    let sheet = GridSheet::from_rows(
        "goods",
        vec![
            vec!["商品编码", "单价", "数量", "单位"],
            vec!["ABC-0001", "12.50", "3", "件"],
            vec!["abc-1", "12.5.0", "", "袋"],
            vec!["XYZ-9999", "1e2", "5", "箱"],
        ],
    );

    let outcome = SheetImporter::new(options).import_rows(&sheet, &schema, 0, 1).unwrap();

    assert_eq!(outcome.records().len(), 2);
    let first = &outcome.records()[0].object;
    assert_eq!(first.get("sku"), Some(&FieldValue::Text("ABC-0001".to_string())));
    assert_eq!(first.get("price"), Some(&FieldValue::Decimal(Decimal::new(1250, 2))));
    assert_eq!(first.get("qty"), Some(&FieldValue::Long(3)));
    assert_eq!(first.get("unit"), Some(&FieldValue::Text("PCS".to_string())));

    let last = &outcome.records()[1].object;
    assert_eq!(outcome.records()[1].row, 4);
    assert_eq!(last.get("qty"), Some(&FieldValue::Long(5)));
    assert_eq!(last.get("price"), Some(&FieldValue::Decimal(Decimal::new(100, 0))));

    let kinds: Vec<RowErrorKind> = outcome.errors().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RowErrorKind::Format,
            RowErrorKind::TypeIllegal,
            RowErrorKind::TypeIllegal,
            RowErrorKind::IllegalValue,
        ]
    );
}

#[test]
fn test_record_serializes_as_plain_json_object() {
    let schema = SchemaConfig::from_json_str(SCHEMA_JSON).unwrap().into_schema().unwrap();
    let options = OptionTable::from_json_str(OPTIONS_JSON).unwrap();
    let sheet = GridSheet::from_rows(
        "goods",
        vec![
            vec!["商品编码", "单价", "数量", "单位"],
            vec!["ABC-0001", "2", "7", "箱"],
        ],
    );

    let outcome = SheetImporter::new(options).import_rows(&sheet, &schema, 0, 1).unwrap();
    let json = serde_json::to_value(&outcome.records()[0].object).unwrap();

    assert_eq!(json["sku"], "ABC-0001");
    assert_eq!(json["qty"], 7);
    assert_eq!(json["unit"], "BOX");
}

#[test]
fn test_import_options_from_file() {
    let file = write_temp_file(".json", r#"{"header_row": 3, "first_data_row": 5, "sheet": "Sheet2", "format": "xlsx"}"#);
    let options = ImportOptions::from_json_file(file.path()).unwrap();

    assert_eq!(options.header_row, 3);
    assert_eq!(options.first_data_row, 5);
    assert_eq!(options.sheet.as_deref(), Some("Sheet2"));
}

#[test]
fn test_malformed_config_files() {
    let file = write_temp_file(".json", "{ not json");
    assert!(matches!(
        SchemaConfig::from_json_file(file.path()),
        Err(ImportError::ConfigReadError { .. })
    ));
    assert!(matches!(
        OptionTable::from_json_file(file.path()),
        Err(ImportError::ConfigReadError { .. })
    ));
    assert!(matches!(
        ImportOptions::from_json_file(file.path()),
        Err(ImportError::ConfigReadError { .. })
    ));
}
