use crate::models::AttendanceData;
use std::sync::Arc;

/// Shared, read-only view of the data loaded at startup.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<AttendanceData>,
}

impl AppState {
    pub fn new(data: AttendanceData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }
}
