// ==========================================
// 电子表格导入 - 单元格文本清洗
// ==========================================
// 职责: 单元格值 → 文本；去除空白与控制字符
// 说明: 表头匹配、空行判定、字段取值统一走这里
// ==========================================

use crate::domain::cell::{CellValue, FormulaValue};

/// 日期单元格渲染格式（可被日期解析器再次识别）
pub const DATE_CELL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 去除换页/换行/回车/制表/垂直制表符，再去掉首尾空白和控制字符
pub fn normalize_text(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '\u{0C}' | '\n' | '\r' | '\t' | '\u{0B}'))
        .collect();
    stripped
        .trim_matches(|c: char| c.is_whitespace() || c.is_control())
        .to_string()
}

/// 将单元格渲染为文本（未清洗）
pub fn cell_text(cell: Option<&CellValue>) -> String {
    match cell {
        None | Some(CellValue::Empty) => String::new(),
        Some(CellValue::Bool(b)) => b.to_string(),
        Some(CellValue::Number(n)) => number_text(*n),
        Some(CellValue::Text(s)) => s.clone(),
        Some(CellValue::DateTime(dt)) => dt.format(DATE_CELL_FORMAT).to_string(),
        Some(CellValue::Formula(FormulaValue::Number(n))) => number_text(*n),
        Some(CellValue::Formula(FormulaValue::Text(s))) => s.clone(),
        Some(CellValue::Formula(FormulaValue::Bool(b))) => b.to_string(),
        Some(CellValue::Error(e)) => e.clone(),
    }
}

/// 取单元格文本并清洗
pub fn normalized_cell_text(cell: Option<&CellValue>) -> String {
    normalize_text(&cell_text(cell))
}

/// 数值渲染: 整数值不带小数部分（30.0 → "30"）
pub fn number_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_normalize_strips_control_chars() {
        assert_eq!(normalize_text("  Na\tme\n "), "Name");
        assert_eq!(normalize_text("\u{0C}A\u{0B}ge\r"), "Age");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_normalize_keeps_inner_spaces() {
        assert_eq!(normalize_text(" First Name "), "First Name");
    }

    #[test]
    fn test_cell_text_numbers() {
        assert_eq!(cell_text(Some(&CellValue::Number(30.0))), "30");
        assert_eq!(cell_text(Some(&CellValue::Number(2.5))), "2.5");
        assert_eq!(cell_text(Some(&CellValue::Number(-7.0))), "-7");
        assert_eq!(
            cell_text(Some(&CellValue::Formula(FormulaValue::Number(12.0)))),
            "12"
        );
    }

    #[test]
    fn test_cell_text_other_kinds() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&CellValue::Empty)), "");
        assert_eq!(cell_text(Some(&CellValue::Bool(true))), "true");
        let dt = NaiveDate::from_ymd_opt(2012, 3, 21)
            .unwrap()
            .and_hms_opt(18, 11, 43)
            .unwrap();
        assert_eq!(
            cell_text(Some(&CellValue::DateTime(dt))),
            "2012-03-21 18:11:43"
        );
    }
}
