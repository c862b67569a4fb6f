// ==========================================
// 电子表格导入 - 配置层
// ==========================================
// 职责: 导入选项、字段声明配置
// 存储: JSON 文件
// ==========================================

pub mod import_options;
pub mod schema_config;

// 重导出核心配置类型
pub use import_options::ImportOptions;
pub use schema_config::{FieldConfig, SchemaConfig};
