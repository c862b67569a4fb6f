// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的目标类型、选项表、临时文件
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sheet_import::domain::{DropdownMode, FieldDescriptor, Schema, SheetRecord};
use sheet_import::importer::{GridSheet, OptionTable};
use std::io::Write;
use tempfile::NamedTempFile;

// ==========================================
// Member - 测试用目标类型
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Member {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub status: String,
    pub code: String,
    pub joined: Option<NaiveDateTime>,
    pub salary: Decimal,
}

impl SheetRecord for Member {
    fn schema() -> Schema<Self> {
        Schema::new()
            .field(FieldDescriptor::text("name", "姓名", |m: &mut Member, v| m.name = v))
            .field(FieldDescriptor::integer("age", "年龄", |m: &mut Member, v| m.age = v).optional())
            .field(
                FieldDescriptor::text("gender", "性别", |m: &mut Member, v| m.gender = v)
                    .dropdown("gender", DropdownMode::Translate),
            )
            .field(
                FieldDescriptor::text("status", "状态", |m: &mut Member, v| m.status = v)
                    .dropdown("status", DropdownMode::Validate)
                    .optional(),
            )
            .field(
                FieldDescriptor::text("code", "编号", |m: &mut Member, v| m.code = v)
                    .optional()
                    .pattern(r"[A-Z]{2}\d{3}")
                    .expect("合法正则"),
            )
            .field(FieldDescriptor::date("joined", "入职日期", |m: &mut Member, v| m.joined = Some(v)).optional())
            .field(FieldDescriptor::decimal("salary", "薪资", |m: &mut Member, v| m.salary = v).optional())
    }
}

pub const MEMBER_HEADER: [&str; 7] = ["姓名", "年龄", "性别", "状态", "编号", "入职日期", "薪资"];

/// 性别（translate）+ 状态（validate）
pub fn member_options() -> OptionTable {
    OptionTable::new()
        .with_group("gender", [("男", "M"), ("女", "F")])
        .with_group("status", [("在职", "1"), ("离职", "0")])
}

/// 所有列均合法的一行；可空列也需填写（空值仍要通过下拉框与类型转换）
pub fn member_row<'a>(name: &'a str, age: &'a str, gender: &'a str) -> Vec<&'a str> {
    vec![name, age, gender, "1", "AB123", "2012-03-21", "100"]
}

/// 以表头 + 数据行构造工作表
pub fn member_sheet(rows: Vec<Vec<&str>>) -> GridSheet {
    let mut all = vec![MEMBER_HEADER.to_vec()];
    all.extend(rows);
    GridSheet::from_rows("members", all)
}

/// 写入临时文件（保持返回值存活）
pub fn write_temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("创建临时文件失败");
    file.write_all(content.as_bytes()).expect("写入临时文件失败");
    file.flush().expect("刷新临时文件失败");
    file
}
