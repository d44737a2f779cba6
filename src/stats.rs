use crate::models::{
    AttendanceData, ClassAttendanceRecord, ClassPoint, MonthlyAttendanceRecord, MonthlyPoint,
    OverallStats, StatsResponse,
};
use chrono::NaiveDate;

/// Attendance rate in percent, rounded to one decimal.
///
/// A record without sessions yields `0.0` with `has_sessions == false`; that
/// zero is a placeholder, not a measured rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedPercentage {
    pub value: f64,
    pub has_sessions: bool,
}

impl DerivedPercentage {
    pub fn new(present_count: u32, total_sessions: u32) -> Self {
        Self::from_counts(u64::from(present_count), u64::from(total_sessions))
    }

    pub fn from_counts(present_count: u64, total_sessions: u64) -> Self {
        if total_sessions == 0 {
            return Self {
                value: 0.0,
                has_sessions: false,
            };
        }

        let raw = present_count as f64 / total_sessions as f64 * 100.0;
        Self {
            value: round_tenth(raw),
            has_sessions: true,
        }
    }

    /// One-decimal text used in tooltips and tables, e.g. `90.0`.
    pub fn display(&self) -> String {
        format!("{:.1}", self.value)
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Parses a `YYYY-MM` month key into the first day of that month.
pub fn parse_month(month: &str) -> Option<NaiveDate> {
    let (year, month) = month.split_once('-')?;
    let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) || !digits(month, 2) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// `"2024-01"` becomes `"January 2024"`.
pub fn month_label(month: &str) -> Option<String> {
    parse_month(month).map(|date| date.format("%B %Y").to_string())
}

pub fn overall_stats(classes: &[ClassAttendanceRecord]) -> OverallStats {
    let total_sessions: u64 = classes.iter().map(|c| u64::from(c.total_sessions)).sum();
    let present_count: u64 = classes.iter().map(|c| u64::from(c.present_count)).sum();

    OverallStats {
        total_sessions,
        present_count,
        absent_count: total_sessions.saturating_sub(present_count),
        attendance_rate: DerivedPercentage::from_counts(present_count, total_sessions).value,
    }
}

pub fn build_stats(data: &AttendanceData) -> StatsResponse {
    StatsResponse {
        overall: overall_stats(&data.classes),
        monthly: data.monthly.iter().map(monthly_point).collect(),
        classes: data.classes.iter().map(class_point).collect(),
    }
}

fn monthly_point(record: &MonthlyAttendanceRecord) -> MonthlyPoint {
    let rate = DerivedPercentage::new(record.present_count, record.total_sessions);
    MonthlyPoint {
        month: record.month.clone(),
        label: month_label(&record.month).unwrap_or_else(|| record.month.clone()),
        total_sessions: record.total_sessions,
        present_count: record.present_count,
        attendance_rate: rate.value,
        has_sessions: rate.has_sessions,
    }
}

fn class_point(record: &ClassAttendanceRecord) -> ClassPoint {
    let rate = DerivedPercentage::new(record.present_count, record.total_sessions);
    ClassPoint {
        class_id: record.class_id.clone(),
        class_name: record.class_name.clone(),
        course_name: record.course_name.clone(),
        total_sessions: record.total_sessions,
        present_count: record.present_count,
        attendance_rate: rate.value,
        has_sessions: rate.has_sessions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, total: u32, present: u32) -> ClassAttendanceRecord {
        ClassAttendanceRecord {
            class_id: None,
            class_name: name.to_string(),
            course_name: None,
            total_sessions: total,
            present_count: present,
        }
    }

    #[test]
    fn zero_sessions_is_zero_without_sessions_flag() {
        let pct = DerivedPercentage::new(0, 0);
        assert_eq!(pct.value, 0.0);
        assert!(!pct.has_sessions);
        assert!(!pct.value.is_nan());
    }

    #[test]
    fn zero_present_is_a_real_zero() {
        let pct = DerivedPercentage::new(0, 10);
        assert_eq!(pct.value, 0.0);
        assert!(pct.has_sessions);
        assert_eq!(pct.display(), "0.0");
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(DerivedPercentage::new(18, 20).value, 90.0);
        assert_eq!(DerivedPercentage::new(1, 3).value, 33.3);
        assert_eq!(DerivedPercentage::new(2, 3).value, 66.7);
    }

    #[test]
    fn percentage_stays_within_bounds() {
        for total in 0..40u32 {
            for present in 0..=total {
                let pct = DerivedPercentage::new(present, total).value;
                assert!((0.0..=100.0).contains(&pct), "{present}/{total} -> {pct}");
            }
        }
    }

    #[test]
    fn month_label_uses_month_name_and_year() {
        assert_eq!(month_label("2024-01").as_deref(), Some("January 2024"));
        assert_eq!(month_label("2023-12").as_deref(), Some("December 2023"));
        assert_eq!(month_label("2024-13"), None);
        assert_eq!(month_label("2024-1"), None);
        assert_eq!(month_label("January"), None);
        assert_eq!(month_label("+202-01"), None);
        assert_eq!(month_label("2024-+1"), None);
        assert_eq!(month_label(" 202-01"), None);
    }

    #[test]
    fn overall_stats_sums_classes() {
        let stats = overall_stats(&[class("Math", 10, 7), class("Art", 10, 10)]);
        assert_eq!(stats.total_sessions, 20);
        assert_eq!(stats.present_count, 17);
        assert_eq!(stats.absent_count, 3);
        assert_eq!(stats.attendance_rate, 85.0);
    }

    #[test]
    fn build_stats_keeps_empty_classes() {
        let data = AttendanceData {
            classes: vec![class("Math", 0, 0)],
            monthly: vec![MonthlyAttendanceRecord {
                month: "2024-01".into(),
                total_sessions: 20,
                present_count: 18,
            }],
            ..AttendanceData::default()
        };

        let stats = build_stats(&data);
        assert_eq!(stats.classes.len(), 1);
        assert!(!stats.classes[0].has_sessions);
        assert_eq!(stats.monthly[0].label, "January 2024");
        assert_eq!(stats.monthly[0].attendance_rate, 90.0);
        assert_eq!(stats.overall.attendance_rate, 0.0);
    }
}
