// ==========================================
// 电子表格导入 - 单元格模型
// ==========================================
// 职责: 描述表格解析器交付给映射引擎的单元格值
// 说明: 与具体的表格库（calamine / csv）解耦
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// 空单元格
    #[default]
    Empty,
    /// 布尔值
    Bool(bool),
    /// 数值（非日期格式）
    Number(f64),
    /// 文本
    Text(String),
    /// 公式（仅保留缓存结果）
    ///
    /// calamine 读取时已直接给出缓存值，不会产生此变体；
    /// 供自行实现 SheetSource、能区分公式单元格的数据源使用
    Formula(FormulaValue),
    /// 表格原生日期（日期格式的数值单元格）
    DateTime(NaiveDateTime),
    /// 错误单元格（如 #DIV/0!）
    Error(String),
}

// ==========================================
// FormulaValue - 公式缓存结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FormulaValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 表格原生解码出的日期（仅日期单元格）
    pub fn native_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    /// 空字符串视为空单元格（与 CSV / 手工构造的表格保持一致）
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}
