// ==========================================
// 电子表格导入 - 类型转换
// ==========================================
// 职责: 清洗后的单元格文本 → 字段语义类型
// 规则:
// - 文本: 原样透传
// - 整数/长整数/单精度/双精度/十进制: 标准数值字面量解析，
//   非法输入一律失败，不回退为 0
// - 日期: 先走自动识别，失败再取单元格原生日期
// ==========================================

use crate::domain::cell::CellValue;
use crate::domain::field::{FieldKind, FieldValue};
use crate::importer::date_parser::parse_date;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("无法将 \"{text}\" 转换为 {kind}")]
pub struct CoercionError {
    pub text: String,
    pub kind: FieldKind,
}

/// 将文本转换为目标语义类型
///
/// # 参数
/// - text: 已清洗（并可能经下拉框转换）的文本
/// - kind: 目标语义类型
/// - cell: 原始单元格（日期回退时使用）
pub fn coerce(
    text: &str,
    kind: FieldKind,
    cell: Option<&CellValue>,
) -> Result<FieldValue, CoercionError> {
    let fail = || CoercionError {
        text: text.to_string(),
        kind,
    };

    match kind {
        FieldKind::Text => Ok(FieldValue::Text(text.to_string())),
        FieldKind::Integer => text.parse::<i32>().map(FieldValue::Integer).map_err(|_| fail()),
        FieldKind::Long => text.parse::<i64>().map(FieldValue::Long).map_err(|_| fail()),
        FieldKind::Float => text.parse::<f32>().map(FieldValue::Float).map_err(|_| fail()),
        FieldKind::Double => text.parse::<f64>().map(FieldValue::Double).map_err(|_| fail()),
        FieldKind::Decimal => parse_decimal(text).map(FieldValue::Decimal).ok_or_else(fail),
        FieldKind::Date => parse_date(text)
            .or_else(|| cell.and_then(CellValue::native_datetime))
            .map(FieldValue::Date)
            .ok_or_else(fail),
    }
}

/// 十进制解析：普通字面量优先，其次科学计数法
fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
