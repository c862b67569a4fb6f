// ==========================================
// 电子表格导入 - 字段声明配置
// ==========================================
// 职责: JSON 字段声明 → Schema<Record>
// 说明: 字段顺序即声明顺序，行内错误按此顺序输出
// ==========================================

use crate::domain::field::{DropdownMode, FieldDescriptor, FieldKind, Schema};
use crate::domain::record::Record;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

fn default_required() -> bool {
    true
}

// ==========================================
// FieldConfig - 单个字段声明
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub field: String,
    pub column: String,
    /// 语义类型名（text / integer / long / float / double / decimal / date）
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub dropdown: Option<String>,
    #[serde(default)]
    pub dropdown_mode: DropdownMode,
    #[serde(default)]
    pub pattern: Option<String>,
}

fn default_kind() -> String {
    FieldKind::Text.as_str().to_string()
}

impl FieldConfig {
    /// 构建 Record 字段描述；未知类型或非法正则为 InvalidSchema
    pub fn to_descriptor(&self) -> ImportResult<FieldDescriptor<Record>> {
        let kind: FieldKind = self.kind.parse().map_err(|message| ImportError::InvalidSchema {
            field: self.field.clone(),
            message,
        })?;

        let name = self.field.clone();
        let mut descriptor = FieldDescriptor::new(&self.field, &self.column, kind, move |record: &mut Record, value| {
            record.set(name.as_str(), value);
            Ok(())
        })
        .required(self.required);

        if let Some(dropdown) = &self.dropdown {
            descriptor = descriptor.dropdown(dropdown, self.dropdown_mode);
        }
        if let Some(pattern) = &self.pattern {
            descriptor = descriptor.pattern(pattern).map_err(|e| ImportError::InvalidSchema {
                field: self.field.clone(),
                message: e.to_string(),
            })?;
        }
        Ok(descriptor)
    }
}

// ==========================================
// SchemaConfig - 字段声明列表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    pub fields: Vec<FieldConfig>,
}

impl SchemaConfig {
    pub fn from_json_str(raw: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let config_error = |message: String| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message,
        };
        let raw = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| config_error(e.to_string()))
    }

    pub fn into_schema(self) -> ImportResult<Schema<Record>> {
        self.to_schema()
    }

    pub fn to_schema(&self) -> ImportResult<Schema<Record>> {
        let mut schema = Schema::new();
        for field in &self.fields {
            schema.push(field.to_descriptor()?);
        }
        debug!(fields = schema.len(), "字段声明配置加载完成");
        Ok(schema)
    }
}
