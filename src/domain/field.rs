// ==========================================
// 电子表格导入 - 字段描述与目标类型注册
// ==========================================
// 职责: 用显式的字段描述列表替代运行时注解扫描
// 说明: 每个字段携带列名、必填、下拉框、正则、语义类型
//       以及一个类型化的赋值闭包（注册时构建一次）
// ==========================================

use chrono::NaiveDateTime;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// FieldKind - 字段语义类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    Date,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Long => "long",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::Decimal => "decimal",
            FieldKind::Date => "date",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "string" => Ok(FieldKind::Text),
            "integer" | "int" => Ok(FieldKind::Integer),
            "long" => Ok(FieldKind::Long),
            "float" => Ok(FieldKind::Float),
            "double" => Ok(FieldKind::Double),
            "decimal" => Ok(FieldKind::Decimal),
            "date" | "datetime" => Ok(FieldKind::Date),
            other => Err(format!("未知字段类型: {}", other)),
        }
    }
}

// ==========================================
// FieldValue - 类型转换后的字段值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Date(NaiveDateTime),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Long(_) => FieldKind::Long,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Double(_) => FieldKind::Double,
            FieldValue::Decimal(_) => FieldKind::Decimal,
            FieldValue::Date(_) => FieldKind::Date,
        }
    }

    /// 还原为单元格文本（用于回写 / 对比）
    pub fn to_cell_text(&self) -> String {
        match self {
            FieldValue::Text(v) => v.clone(),
            FieldValue::Integer(v) => v.to_string(),
            FieldValue::Long(v) => v.to_string(),
            FieldValue::Float(v) => v.to_string(),
            FieldValue::Double(v) => v.to_string(),
            FieldValue::Decimal(v) => v.normalize().to_string(),
            FieldValue::Date(v) => v.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Rust 类型 ↔ 字段值 的转换约定
pub trait FromFieldValue: Sized {
    const KIND: FieldKind;

    fn from_field_value(value: FieldValue) -> Option<Self>;
}

macro_rules! impl_from_field_value {
    ($ty:ty, $kind:ident) => {
        impl FromFieldValue for $ty {
            const KIND: FieldKind = FieldKind::$kind;

            fn from_field_value(value: FieldValue) -> Option<Self> {
                match value {
                    FieldValue::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_from_field_value!(String, Text);
impl_from_field_value!(i32, Integer);
impl_from_field_value!(i64, Long);
impl_from_field_value!(f32, Float);
impl_from_field_value!(f64, Double);
impl_from_field_value!(Decimal, Decimal);
impl_from_field_value!(NaiveDateTime, Date);

// ==========================================
// AssignError - 赋值失败（区别于类型转换失败）
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
#[error("字段 {field} 赋值失败: {message}")]
pub struct AssignError {
    pub field: String,
    pub message: String,
}

impl AssignError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ==========================================
// DropdownMode / Dropdown - 下拉框处理模式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropdownMode {
    /// 单元格填写的是显示名，转换为存储值
    Translate,
    /// 单元格填写的是存储值，校验其合法性
    #[default]
    Validate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    pub name: String,
    pub mode: DropdownMode,
}

type FieldSetter<T> = Box<dyn Fn(&mut T, FieldValue) -> Result<(), AssignError> + Send + Sync>;

// ==========================================
// FieldDescriptor - 字段描述
// ==========================================
pub struct FieldDescriptor<T> {
    field: String,
    column: String,
    required: bool,
    dropdown: Option<Dropdown>,
    pattern: Option<Regex>,
    kind: FieldKind,
    setter: FieldSetter<T>,
}

impl<T> FieldDescriptor<T> {
    /// 以原始赋值函数创建字段描述
    ///
    /// # 参数
    /// - field: 目标字段标识
    /// - column: 对应的表头列名（为空则不参与映射）
    /// - kind: 语义类型，决定单元格文本的转换方式
    /// - setter: 赋值函数，失败时产生 illegal-access 错误
    pub fn new<F>(field: impl Into<String>, column: impl Into<String>, kind: FieldKind, setter: F) -> Self
    where
        F: Fn(&mut T, FieldValue) -> Result<(), AssignError> + Send + Sync + 'static,
    {
        Self {
            field: field.into(),
            column: column.into(),
            required: true,
            dropdown: None,
            pattern: None,
            kind,
            setter: Box::new(setter),
        }
    }

    /// 以类型化 setter 创建字段描述，语义类型由 V 决定
    pub fn typed<V, F>(field: impl Into<String>, column: impl Into<String>, set: F) -> Self
    where
        V: FromFieldValue,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let field = field.into();
        let name = field.clone();
        Self::new(field, column, V::KIND, move |target, value| {
            let actual = value.kind();
            let v = V::from_field_value(value).ok_or_else(|| {
                AssignError::new(&name, format!("期望 {} 类型，实际为 {}", V::KIND, actual))
            })?;
            set(target, v);
            Ok(())
        })
    }

    pub fn text<F>(field: impl Into<String>, column: impl Into<String>, set: F) -> Self
    where
        F: Fn(&mut T, String) + Send + Sync + 'static,
    {
        Self::typed::<String, F>(field, column, set)
    }

    pub fn integer<F>(field: impl Into<String>, column: impl Into<String>, set: F) -> Self
    where
        F: Fn(&mut T, i32) + Send + Sync + 'static,
    {
        Self::typed::<i32, F>(field, column, set)
    }

    pub fn long<F>(field: impl Into<String>, column: impl Into<String>, set: F) -> Self
    where
        F: Fn(&mut T, i64) + Send + Sync + 'static,
    {
        Self::typed::<i64, F>(field, column, set)
    }

    pub fn float<F>(field: impl Into<String>, column: impl Into<String>, set: F) -> Self
    where
        F: Fn(&mut T, f32) + Send + Sync + 'static,
    {
        Self::typed::<f32, F>(field, column, set)
    }

    pub fn double<F>(field: impl Into<String>, column: impl Into<String>, set: F) -> Self
    where
        F: Fn(&mut T, f64) + Send + Sync + 'static,
    {
        Self::typed::<f64, F>(field, column, set)
    }

    pub fn decimal<F>(field: impl Into<String>, column: impl Into<String>, set: F) -> Self
    where
        F: Fn(&mut T, Decimal) + Send + Sync + 'static,
    {
        Self::typed::<Decimal, F>(field, column, set)
    }

    pub fn date<F>(field: impl Into<String>, column: impl Into<String>, set: F) -> Self
    where
        F: Fn(&mut T, NaiveDateTime) + Send + Sync + 'static,
    {
        Self::typed::<NaiveDateTime, F>(field, column, set)
    }

    /// 允许为空（默认必填）
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// 绑定下拉框；下拉框名称为空时忽略处理模式
    pub fn dropdown(mut self, name: impl Into<String>, mode: DropdownMode) -> Self {
        let name = name.into();
        self.dropdown = if name.trim().is_empty() {
            None
        } else {
            Some(Dropdown { name, mode })
        };
        self
    }

    /// 设置正则校验（完全匹配）
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(&format!("^(?:{})$", pattern))?)
        };
        Ok(self)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn dropdown_spec(&self) -> Option<&Dropdown> {
        self.dropdown.as_ref()
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// 完全匹配校验；未设置正则时恒为 true
    pub fn matches_pattern(&self, value: &str) -> bool {
        self.pattern.as_ref().map_or(true, |re| re.is_match(value))
    }

    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn assign(&self, target: &mut T, value: FieldValue) -> Result<(), AssignError> {
        (self.setter)(target, value)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("field", &self.field)
            .field("column", &self.column)
            .field("required", &self.required)
            .field("dropdown", &self.dropdown)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("kind", &self.kind)
            .finish()
    }
}

// ==========================================
// Schema - 目标类型的字段描述列表（有序）
// ==========================================
pub struct Schema<T> {
    fields: Vec<FieldDescriptor<T>>,
    factory: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T: Default + 'static> Schema<T> {
    pub fn new() -> Self {
        Self::with_factory(T::default)
    }
}

impl<T: Default + 'static> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Schema<T> {
    /// 自定义目标对象的构造方式
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            fields: Vec::new(),
            factory: Box::new(factory),
        }
    }

    pub fn field(mut self, descriptor: FieldDescriptor<T>) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn push(&mut self, descriptor: FieldDescriptor<T>) {
        self.fields.push(descriptor);
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn new_target(&self) -> T {
        (self.factory)()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema").field("fields", &self.fields).finish()
    }
}

// ==========================================
// SheetRecord - 可由表格行构造的目标类型
// ==========================================
pub trait SheetRecord: Sized {
    fn schema() -> Schema<Self>;
}
