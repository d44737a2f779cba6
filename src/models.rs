use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAttendanceRecord {
    pub month: String,
    pub total_sessions: u32,
    pub present_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAttendanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    pub total_sessions: u32,
    pub present_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub date: String,
    pub class_id: String,
    pub class_name: String,
    pub course_name: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    #[serde(default)]
    pub marked_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudentProfile {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl StudentProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Everything the portal knows about one student, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AttendanceData {
    #[serde(default)]
    pub student: Option<StudentProfile>,
    #[serde(default)]
    pub monthly: Vec<MonthlyAttendanceRecord>,
    #[serde(default)]
    pub classes: Vec<ClassAttendanceRecord>,
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub total_sessions: u64,
    pub present_count: u64,
    pub absent_count: u64,
    pub attendance_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub label: String,
    pub total_sessions: u32,
    pub present_count: u32,
    pub attendance_rate: f64,
    pub has_sessions: bool,
}

#[derive(Debug, Serialize)]
pub struct ClassPoint {
    pub class_id: Option<String>,
    pub class_name: String,
    pub course_name: Option<String>,
    pub total_sessions: u32,
    pub present_count: u32,
    pub attendance_rate: f64,
    pub has_sessions: bool,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub overall: OverallStats,
    pub monthly: Vec<MonthlyPoint>,
    pub classes: Vec<ClassPoint>,
}
