// ==========================================
// 电子表格导入 - 动态记录
// ==========================================
// 职责: 字段集合在运行时（配置文件）声明时使用的目标类型
// ==========================================

use crate::domain::field::FieldValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// 字段名 → 字段值；未赋值（可空且为空）的字段不出现
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }
}
