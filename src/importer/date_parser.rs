// ==========================================
// 电子表格导入 - 日期自动识别
// ==========================================
// 职责: 按有序的 (正则, 格式) 表尝试解析日期字符串
// 说明: 正则之间并不互斥，必须按表顺序尝试
//       （如纯 4 位年份必须排在 yyyy-M 之后）
//
// 可识别示例:
//   2012-3-21, 2012-03-21
//   2012-3-21 18:11:43, 2012-03-21 18:11:43.567
//   2012/3/21, 2012/03/21 18:11:43, 2012/03/21 18:11:43.567
//   2012.3.21, 2012.03.21 18:11:43, 2012.03.21 18:11:43.567
//   Wed Mar 21 18:11:43 CST 2012
//   21/3/2012, 21/03/2012
//   20120321
//   2012-03, 2012
//   1332324703000（毫秒时间戳）
// ==========================================

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy)]
enum DateLayout {
    /// 仅日期，时间取 00:00:00
    Date(&'static str),
    /// 日期 + 时间
    DateTime(&'static str),
    /// 形如 "Wed Mar 21 18:11:43 CST 2012"
    CTime,
    /// yyyy-M，日取 1
    YearMonth,
    /// yyyy，月日取 1
    Year,
}

static DATE_PATTERNS: Lazy<Vec<(Regex, DateLayout)>> = Lazy::new(|| {
    let table: [(&str, DateLayout); 14] = [
        (r"[0-9]{4}(-[0-9]{1,2}){2}", DateLayout::Date("%Y-%m-%d")),
        (
            r"[0-9]{4}(-[0-9]{1,2}){2} [0-9]{1,2}(:[0-9]{1,2}){2}",
            DateLayout::DateTime("%Y-%m-%d %H:%M:%S"),
        ),
        (
            r"[0-9]{4}(-[0-9]{1,2}){2} [0-9]{1,2}(:[0-9]{1,2}){2}\.[0-9]{1,3}",
            DateLayout::DateTime("%Y-%m-%d %H:%M:%S%.f"),
        ),
        (
            r"([A-Z][a-z]{2} ){2}[0-9]{1,2} [0-9]{1,2}(:[0-9]{1,2}){2} [A-Z]{3} [0-9]{4}",
            DateLayout::CTime,
        ),
        (r"[0-9]{4}(/[0-9]{1,2}){2}", DateLayout::Date("%Y/%m/%d")),
        (
            r"[0-9]{4}(/[0-9]{1,2}){2} [0-9]{1,2}(:[0-9]{1,2}){2}",
            DateLayout::DateTime("%Y/%m/%d %H:%M:%S"),
        ),
        (
            r"[0-9]{4}(/[0-9]{1,2}){2} [0-9]{1,2}(:[0-9]{1,2}){2}\.[0-9]{1,3}",
            DateLayout::DateTime("%Y/%m/%d %H:%M:%S%.f"),
        ),
        (r"[0-9]{4}(\.[0-9]{1,2}){2}", DateLayout::Date("%Y.%m.%d")),
        (
            r"[0-9]{4}(\.[0-9]{1,2}){2} [0-9]{1,2}(:[0-9]{1,2}){2}",
            DateLayout::DateTime("%Y.%m.%d %H:%M:%S"),
        ),
        (
            r"[0-9]{4}(\.[0-9]{1,2}){2} [0-9]{1,2}(:[0-9]{1,2}){2}\.[0-9]{1,3}",
            DateLayout::DateTime("%Y.%m.%d %H:%M:%S%.f"),
        ),
        (r"([0-9]{1,2}/){2}[0-9]{4}", DateLayout::Date("%d/%m/%Y")),
        (r"[0-9]{8}", DateLayout::Date("%Y%m%d")),
        (r"[0-9]{4}(-[0-9]{1,2}){1}", DateLayout::YearMonth),
        (r"[0-9]{4}", DateLayout::Year),
    ];

    table
        .iter()
        .filter_map(|(pattern, layout)| {
            Regex::new(&format!("^(?:{})$", pattern))
                .ok()
                .map(|re| (re, *layout))
        })
        .collect()
});

/// 自动识别日期字符串
///
/// # 返回
/// - Some(NaiveDateTime): 第一个完全匹配的模式解析成功
/// - None: 空串 / 无匹配模式 / 匹配但日期不合法（不视为错误，由调用方决定）
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }

    if let Some((_, layout)) = DATE_PATTERNS.iter().find(|(re, _)| re.is_match(text)) {
        return parse_with_layout(text, *layout);
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc());
    }

    None
}

fn parse_with_layout(text: &str, layout: DateLayout) -> Option<NaiveDateTime> {
    match layout {
        DateLayout::Date(fmt) => NaiveDate::parse_from_str(text, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        DateLayout::DateTime(fmt) => NaiveDateTime::parse_from_str(text, fmt).ok(),
        DateLayout::CTime => {
            // 星期与时区缩写不参与计算，保留字面时间
            let parts: Vec<&str> = text.split(' ').collect();
            if parts.len() != 6 {
                return None;
            }
            let kept = format!("{} {} {} {}", parts[1], parts[2], parts[3], parts[5]);
            NaiveDateTime::parse_from_str(&kept, "%b %d %H:%M:%S %Y").ok()
        }
        DateLayout::YearMonth => NaiveDate::parse_from_str(&format!("{}-1", text), "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        DateLayout::Year => text
            .parse::<i32>()
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
    }
}
