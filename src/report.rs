use crate::models::{SessionRecord, StudentProfile};
use chrono::NaiveDateTime;

/// Report formats `/attendance/download` can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
}

impl ReportFormat {
    /// A missing or blank `format` means CSV; unknown formats give `None`.
    pub fn from_param(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            None | Some("") => Some(Self::Csv),
            Some(format) if format.eq_ignore_ascii_case("csv") => Some(Self::Csv),
            Some(_) => None,
        }
    }
}

pub fn report_filename(generated: NaiveDateTime) -> String {
    format!("attendance_report_{}.csv", generated.format("%Y%m%d_%H%M%S"))
}

/// Student header block followed by one row per session.
pub fn build_csv_report(
    student: Option<&StudentProfile>,
    records: &[&SessionRecord],
    generated: NaiveDateTime,
) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(["Student Report"])?;
    if let Some(student) = student {
        writer.write_record(["Name:", student.full_name().as_str()])?;
        writer.write_record(["Student ID:", student.student_id.as_str()])?;
    }
    let generated = generated.format("%Y-%m-%d %H:%M:%S").to_string();
    writer.write_record(["Generated:", generated.as_str()])?;
    writer.write_record([""])?;

    writer.write_record(["Date", "Class", "Course", "Time", "Status", "Marked At"])?;
    for record in records {
        let time = format!("{} - {}", record.start_time, record.end_time);
        writer.write_record([
            record.date.as_str(),
            record.class_name.as_str(),
            record.course_name.as_str(),
            time.as_str(),
            record.status.as_str(),
            record.marked_at.as_deref().unwrap_or(""),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn generated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(8, 30, 5)
            .unwrap()
    }

    #[test]
    fn only_csv_format_is_accepted() {
        assert_eq!(ReportFormat::from_param(None), Some(ReportFormat::Csv));
        assert_eq!(ReportFormat::from_param(Some("")), Some(ReportFormat::Csv));
        assert_eq!(ReportFormat::from_param(Some("CSV")), Some(ReportFormat::Csv));
        assert_eq!(ReportFormat::from_param(Some("pdf")), None);
        assert_eq!(ReportFormat::from_param(Some("excel")), None);
    }

    #[test]
    fn filename_carries_timestamp() {
        assert_eq!(
            report_filename(generated()),
            "attendance_report_20240201_083005.csv"
        );
    }

    #[test]
    fn csv_lists_student_and_sessions() {
        let student = StudentProfile {
            student_id: "S-1".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        };
        let session = SessionRecord {
            date: "2024-01-15".into(),
            class_id: "7".into(),
            class_name: "Math, Group A".into(),
            course_name: "Algebra".into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            status: "Present".into(),
            marked_at: Some("2024-01-15 09:02:00".into()),
        };

        let bytes = build_csv_report(Some(&student), &[&session], generated()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Student Report");
        assert_eq!(lines[1], "Name:,Ada Lovelace");
        assert_eq!(lines[2], "Student ID:,S-1");
        assert_eq!(lines[3], "Generated:,2024-02-01 08:30:05");
        assert_eq!(lines[5], "Date,Class,Course,Time,Status,Marked At");
        assert_eq!(
            lines[6],
            "2024-01-15,\"Math, Group A\",Algebra,09:00 - 10:00,Present,2024-01-15 09:02:00"
        );
    }
}
