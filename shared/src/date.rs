//! 时间格式化模块
//!
//! 订单列表与订单详情中的时间显示为相对日期加时刻，例如 `Today, 16:20`。

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// 将订单时间格式化为相对于 `now` 的日期描述
///
/// 两个时间需处于同一时区，按日历日（而非 24 小时）计算差值。
/// 晚于 `now` 的时间（时钟偏差）按当天处理。
pub fn relative_date<Tz: TimeZone>(at: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let days = (now.date_naive() - at.date_naive()).num_days();
    let time = at.format("%H:%M");

    match days {
        i64::MIN..=0 => format!("Today, {}", time),
        1 => format!("Yesterday, {}", time),
        n => format!("{} days ago, {}", n, time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn same_day_is_today() {
        let now = at("2024-05-02T23:59:00Z");
        assert_eq!(relative_date(&at("2024-05-02T00:05:00Z"), &now), "Today, 00:05");
    }

    #[test]
    fn counts_calendar_days() {
        let now = at("2024-05-02T00:10:00Z");
        assert_eq!(
            relative_date(&at("2024-05-01T23:50:00Z"), &now),
            "Yesterday, 23:50"
        );
        assert_eq!(
            relative_date(&at("2024-04-28T12:00:00Z"), &now),
            "4 days ago, 12:00"
        );
    }

    #[test]
    fn future_timestamp_is_today() {
        let now = at("2024-05-02T10:00:00Z");
        assert_eq!(relative_date(&at("2024-05-03T01:00:00Z"), &now), "Today, 01:00");
    }
}
