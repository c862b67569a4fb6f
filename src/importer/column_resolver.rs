// ==========================================
// 电子表格导入 - 列解析
// ==========================================
// 职责: 表头行 → 列名/列下标映射
//       字段声明 → 列名/字段映射
//       二者按列名连接 → 字段/列下标映射
// 约定:
// - 表头从左到右扫描，重名列后者覆盖前者
// - 多个字段声明同一列名时，后声明者覆盖前者
// - 未在表头出现的字段、未被声明的列均静默丢弃
// ==========================================

use crate::domain::field::Schema;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::sheet_source::SheetSource;
use crate::importer::text_cleaner::{normalize_text, normalized_cell_text};
use std::collections::HashMap;
use tracing::debug;

/// 清洗后的表头文本 → 列下标（0 起始）
pub type ColumnIndexMap = HashMap<String, u32>;

/// 清洗后的声明列名 → 字段序号（在 Schema 中的位置）
pub type DeclaredColumnMap = HashMap<String, usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldColumn {
    pub field_index: usize,
    pub column: u32,
}

// ==========================================
// FieldColumnMap - 字段 → 列下标
// ==========================================
// 按字段声明顺序排列，行内错误顺序依赖于此
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldColumnMap {
    entries: Vec<FieldColumn>,
}

impl FieldColumnMap {
    pub fn from_entries(mut entries: Vec<FieldColumn>) -> Self {
        entries.sort_by_key(|e| e.field_index);
        Self { entries }
    }

    pub fn entries(&self) -> &[FieldColumn] {
        &self.entries
    }

    pub fn column_of(&self, field_index: usize) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.field_index == field_index)
            .map(|e| e.column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 读取表头行，构建列名 → 列下标映射（跳过空白列名）
pub fn column_index_map(sheet: &dyn SheetSource, header_row: u32) -> ImportResult<ColumnIndexMap> {
    if !sheet.has_row(header_row) {
        return Err(ImportError::HeaderRowMissing(header_row));
    }

    let mut map = ColumnIndexMap::new();
    for column in 0..sheet.row_len(header_row) {
        let name = normalized_cell_text(sheet.cell(header_row, column));
        if name.is_empty() {
            continue;
        }
        map.insert(name, column);
    }

    if map.is_empty() {
        return Err(ImportError::NoHeaderColumns(header_row));
    }
    Ok(map)
}

/// 由字段声明构建列名 → 字段序号映射（跳过空白列名）
pub fn declared_column_map<T>(schema: &Schema<T>) -> ImportResult<DeclaredColumnMap> {
    let map: DeclaredColumnMap = schema
        .fields()
        .iter()
        .enumerate()
        .filter_map(|(idx, field)| {
            let column = normalize_text(field.column());
            (!column.is_empty()).then_some((column, idx))
        })
        .collect();

    if map.is_empty() {
        return Err(ImportError::NoDeclaredColumns);
    }
    Ok(map)
}

/// 连接两张映射，得到字段 → 列下标
pub fn join_columns(declared: &DeclaredColumnMap, header: &ColumnIndexMap) -> ImportResult<FieldColumnMap> {
    let entries: Vec<FieldColumn> = header
        .iter()
        .filter_map(|(name, &column)| {
            declared.get(name).map(|&field_index| FieldColumn {
                field_index,
                column,
            })
        })
        .collect();

    if entries.is_empty() {
        return Err(ImportError::NoMatchedColumns);
    }
    Ok(FieldColumnMap::from_entries(entries))
}

/// 完整的列解析流程
pub fn resolve<T>(
    sheet: &dyn SheetSource,
    schema: &Schema<T>,
    header_row: u32,
) -> ImportResult<FieldColumnMap> {
    let declared = declared_column_map(schema)?;
    debug!(declared = declared.len(), "字段声明列名解析完成");

    let header = column_index_map(sheet, header_row)?;
    debug!(header_row, columns = header.len(), "表头解析完成");

    let map = join_columns(&declared, &header)?;
    debug!(mapped = map.len(), "字段与列下标映射完成");
    Ok(map)
}

/// 列号（1 起始）→ 表格列标: 1 → A, 26 → Z, 27 → AA
pub fn column_label(mut n: u32) -> String {
    let mut label = Vec::new();
    while n > 0 {
        let m = (n - 1) % 26;
        label.push(b'A' + m as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::FieldDescriptor;
    use crate::importer::sheet_source::GridSheet;

    #[derive(Debug, Default)]
    struct Row {
        a: String,
        b: String,
    }

    fn schema() -> Schema<Row> {
        Schema::new()
            .field(FieldDescriptor::text("a", "Alpha", |r: &mut Row, v| r.a = v))
            .field(FieldDescriptor::text("b", "Beta", |r: &mut Row, v| r.b = v))
    }

    #[test]
    fn test_column_label() {
        assert_eq!(column_label(1), "A");
        assert_eq!(column_label(2), "B");
        assert_eq!(column_label(26), "Z");
        assert_eq!(column_label(27), "AA");
        assert_eq!(column_label(28), "AB");
        assert_eq!(column_label(52), "AZ");
        assert_eq!(column_label(53), "BA");
        assert_eq!(column_label(702), "ZZ");
        assert_eq!(column_label(703), "AAA");
        assert_eq!(column_label(0), "");
    }

    #[test]
    fn test_header_normalized_and_blank_skipped() {
        let sheet = GridSheet::from_rows("s", vec![vec![" Alpha\n", "", "Be\tta"]]);
        let map = column_index_map(&sheet, 0).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Alpha"), Some(&0));
        assert_eq!(map.get("Beta"), Some(&2));
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let sheet = GridSheet::from_rows("s", vec![vec!["Alpha", "Beta", "Alpha"]]);
        let map = column_index_map(&sheet, 0).unwrap();
        assert_eq!(map.get("Alpha"), Some(&2));
    }

    #[test]
    fn test_header_row_missing() {
        let sheet = GridSheet::from_rows("s", vec![vec!["Alpha"]]);
        assert!(matches!(
            column_index_map(&sheet, 4),
            Err(ImportError::HeaderRowMissing(4))
        ));
    }

    #[test]
    fn test_blank_header_row() {
        let sheet = GridSheet::from_rows("s", vec![vec!["", "  "]]);
        assert!(matches!(
            column_index_map(&sheet, 0),
            Err(ImportError::NoHeaderColumns(0))
        ));
    }

    #[test]
    fn test_unmatched_descriptor_silently_dropped() {
        let sheet = GridSheet::from_rows("s", vec![vec!["Beta", "Gamma"]]);
        let map = resolve(&sheet, &schema(), 0).unwrap();
        assert_eq!(
            map.entries(),
            &[FieldColumn {
                field_index: 1,
                column: 0
            }]
        );
        assert_eq!(map.column_of(0), None);
    }

    #[test]
    fn test_no_matched_columns() {
        let sheet = GridSheet::from_rows("s", vec![vec!["Gamma"]]);
        assert!(matches!(
            resolve(&sheet, &schema(), 0),
            Err(ImportError::NoMatchedColumns)
        ));
    }

    #[test]
    fn test_blank_declared_columns() {
        let schema = Schema::<Row>::new().field(FieldDescriptor::text("a", " ", |r: &mut Row, v| r.a = v));
        assert!(matches!(
            declared_column_map(&schema),
            Err(ImportError::NoDeclaredColumns)
        ));
    }

    #[test]
    fn test_duplicate_declared_column_last_wins() {
        let schema = Schema::<Row>::new()
            .field(FieldDescriptor::text("a", "Alpha", |r: &mut Row, v| r.a = v))
            .field(FieldDescriptor::text("b", "Alpha", |r: &mut Row, v| r.b = v));
        let declared = declared_column_map(&schema).unwrap();
        assert_eq!(declared.get("Alpha"), Some(&1));
    }

    #[test]
    fn test_map_sorted_by_declaration_order() {
        let sheet = GridSheet::from_rows("s", vec![vec!["Beta", "Alpha"]]);
        let map = resolve(&sheet, &schema(), 0).unwrap();
        let order: Vec<usize> = map.entries().iter().map(|e| e.field_index).collect();
        assert_eq!(order, vec![0, 1]);
        assert_eq!(map.column_of(0), Some(1));
    }
}
