// ==========================================
// 电子表格导入 - 导入结果与行错误
// ==========================================
// 职责: 行级错误、成功对象（含行号）、整体导入结果
// 说明: 一次导入生成一份结果，调用方消费后即丢弃
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ==========================================
// RowErrorKind - 行级错误类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowErrorKind {
    /// 必填字段为空
    Required,
    /// 下拉框转换/校验失败
    IllegalValue,
    /// 正则完全匹配失败
    Format,
    /// 类型转换失败
    TypeIllegal,
    /// 赋值失败
    IllegalAccess,
}

impl RowErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowErrorKind::Required => "required",
            RowErrorKind::IllegalValue => "illegal-value",
            RowErrorKind::Format => "format",
            RowErrorKind::TypeIllegal => "type-illegal",
            RowErrorKind::IllegalAccess => "illegal-access",
        }
    }

    /// 国际化消息 key
    pub fn message_key(&self) -> &'static str {
        match self {
            RowErrorKind::Required => "row_error.required",
            RowErrorKind::IllegalValue => "row_error.illegal_value",
            RowErrorKind::Format => "row_error.format",
            RowErrorKind::TypeIllegal => "row_error.type_illegal",
            RowErrorKind::IllegalAccess => "row_error.illegal_access",
        }
    }

    /// 当前语言下的错误描述
    pub fn message(&self) -> String {
        crate::i18n::t(self.message_key())
    }
}

impl fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// RowError - 单个字段在单行上的失败
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: u32,        // 行号（从 1 开始，与表格界面一致）
    pub column: String,  // 列标（A/B/.../Z/AA/...）
    pub field: String,   // 目标字段标识
    pub kind: RowErrorKind,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} [{}]: {}", self.column, self.row, self.field, self.kind)
    }
}

// ==========================================
// ParsedRecord - 成功解析的对象及其来源行号
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRecord<T> {
    pub row: u32,
    pub object: T,
}

// ==========================================
// ImportOutcome - 一次导入的最终结果
// ==========================================
// records: 按行顺序
// errors: 按发现顺序（行顺序，行内按字段声明顺序）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportOutcome<T> {
    records: Vec<ParsedRecord<T>>,
    errors: Vec<RowError>,
}

impl<T> ImportOutcome<T> {
    pub fn new(records: Vec<ParsedRecord<T>>, errors: Vec<RowError>) -> Self {
        Self { records, errors }
    }

    pub fn records(&self) -> &[ParsedRecord<T>] {
        &self.records
    }

    pub fn errors(&self) -> &[RowError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 取出成功对象（丢弃行号）
    pub fn into_objects(self) -> Vec<T> {
        self.records.into_iter().map(|r| r.object).collect()
    }

    pub fn into_parts(self) -> (Vec<ParsedRecord<T>>, Vec<RowError>) {
        (self.records, self.errors)
    }

    /// 成功/失败行汇总
    pub fn summary(&self) -> ImportSummary {
        let success_rows: Vec<u32> = self.records.iter().map(|r| r.row).collect();
        let fail_rows: Vec<u32> = self
            .errors
            .iter()
            .map(|e| e.row)
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect();

        ImportSummary {
            success: success_rows.len(),
            success_rows,
            fail: fail_rows.len(),
            fail_rows,
            error_count: self.errors.len(),
        }
    }
}

// ==========================================
// ImportSummary - 导入汇总统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub success: usize,         // 成功条数
    pub success_rows: Vec<u32>, // 成功行号
    pub fail: usize,            // 失败条数（按行去重）
    pub fail_rows: Vec<u32>,    // 失败行号（升序）
    pub error_count: usize,     // 错误总数
}
