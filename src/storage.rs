use crate::models::AttendanceData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

pub fn resolve_data_path() -> PathBuf {
    match env::var("APP_DATA_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from("data/attendance.json"),
    }
}

pub async fn load_data(path: &Path) -> AttendanceData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AttendanceData>(&bytes) {
            Ok(data) => {
                info!(
                    months = data.monthly.len(),
                    classes = data.classes.len(),
                    sessions = data.sessions.len(),
                    "loaded attendance data from {}",
                    path.display()
                );
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AttendanceData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no data file at {}, starting empty", path.display());
            AttendanceData::default()
        }
        Err(err) => {
            error!("failed to read data file: {err}");
            AttendanceData::default()
        }
    }
}
