// ==========================================
// 电子表格导入 - 下拉框选项表
// ==========================================
// 职责: 下拉框名称 → (显示名 → 存储值)
// 说明: 由调用方提供，导入期间只读，可跨多次导入共享
//       不存在的下拉框视为"无此选项组"，转换/校验均失败
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionTable {
    groups: HashMap<String, HashMap<String, String>>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新增（或替换）一个下拉框
    pub fn with_group<I, K, V>(mut self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.insert_group(name, options);
        self
    }

    pub fn insert_group<I, K, V>(&mut self, name: impl Into<String>, options: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let group = options
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.groups.insert(name.into(), group);
    }

    /// 从 JSON 文件加载: { "下拉框名": { "显示名": "存储值" } }
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw).map_err(|e| match e {
            ImportError::ConfigReadError { message, .. } => ImportError::ConfigReadError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_json_str(raw: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn contains_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// 显示名 → 存储值；下拉框或显示名不存在时返回 None
    pub fn translate(&self, name: &str, display: &str) -> Option<&str> {
        self.groups
            .get(name)
            .and_then(|group| group.get(display))
            .map(String::as_str)
    }

    /// 校验存储值是否属于该下拉框
    pub fn is_valid_value(&self, name: &str, value: &str) -> bool {
        self.groups
            .get(name)
            .map_or(false, |group| group.values().any(|v| v == value))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
