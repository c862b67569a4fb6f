// ==========================================
// 电子表格导入 - 命令行入口
// ==========================================
// 用法: sheet-import --file data.xls --schema schema.json [--options options.json]
// 输出: 导入结果（JSON）写到 stdout，日志写到 stderr
// ==========================================

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use sheet_import::config::{ImportOptions, SchemaConfig};
use sheet_import::i18n;
use sheet_import::importer::{OptionTable, SheetImporter, WorkbookFormat};
use sheet_import::logging;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sheet-import", version, about = "电子表格行 → 类型化对象 映射与校验")]
struct Cli {
    /// 待导入的工作簿（.xls / .xlsx / .csv）
    #[arg(short, long)]
    file: PathBuf,

    /// 字段声明配置（JSON）
    #[arg(short, long)]
    schema: PathBuf,

    /// 下拉框选项表（JSON）
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// 导入选项配置（JSON），命令行参数优先
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 表头行号（0 起始）
    #[arg(long)]
    header_row: Option<u32>,

    /// 首个数据行号（0 起始）
    #[arg(long)]
    first_data_row: Option<u32>,

    /// 工作表名称
    #[arg(long)]
    sheet: Option<String>,

    /// 强制文件格式: xls / xlsx / csv
    #[arg(long)]
    format: Option<String>,

    /// 错误消息语言（zh-CN / en）
    #[arg(long, default_value = "zh-CN")]
    locale: String,

    /// JSON 格式日志
    #[arg(long)]
    json_log: bool,

    /// 格式化输出
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn import_options(&self) -> anyhow::Result<ImportOptions> {
        let mut options = match &self.config {
            Some(path) => ImportOptions::from_json_file(path)?,
            None => ImportOptions::default(),
        };
        if let Some(header_row) = self.header_row {
            options.header_row = header_row;
        }
        if let Some(first_data_row) = self.first_data_row {
            options.first_data_row = first_data_row;
        }
        if let Some(sheet) = &self.sheet {
            options.sheet = Some(sheet.clone());
        }
        if let Some(format) = &self.format {
            let format = WorkbookFormat::from_extension(format)
                .with_context(|| format!("未知文件格式: {}", format))?;
            options.format = Some(format);
        }
        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_log {
        logging::init_json();
    } else {
        logging::init();
    }
    i18n::set_locale(&cli.locale);
    tracing::info!(version = sheet_import::VERSION, "sheet-import 启动");

    let schema = SchemaConfig::from_json_file(&cli.schema)?.into_schema()?;
    let option_table = match &cli.options {
        Some(path) => OptionTable::from_json_file(path)?,
        None => OptionTable::new(),
    };
    let import_options = cli.import_options()?;

    let importer = SheetImporter::new(option_table);
    let outcome = match importer.import_file(&cli.file, &schema, &import_options) {
        Ok(outcome) => outcome,
        Err(e) => {
            let reason = e.to_string();
            eprintln!("{}", i18n::t_with_args("summary.structural", &[("reason", reason.as_str())]));
            return Err(e.into());
        }
    };

    let summary = outcome.summary();
    let success = summary.success.to_string();
    let fail = summary.fail.to_string();
    let errors: Vec<_> = outcome
        .errors()
        .iter()
        .map(|e| {
            json!({
                "row": e.row,
                "column": e.column,
                "field": e.field,
                "kind": e.kind,
                "message": e.kind.message(),
            })
        })
        .collect();
    let output = json!({
        "summary": summary,
        "records": outcome.records(),
        "errors": errors,
    });

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    eprintln!(
        "{}",
        i18n::t_with_args("summary.done", &[("success", success.as_str()), ("fail", fail.as_str())])
    );
    Ok(())
}
