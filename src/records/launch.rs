use chrono::{DateTime, Utc};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

/// Момент архивации запущенного файла.
///
/// Форматируется как секунды Unix-эпохи с дробной частью в микросекундах
/// (`1697712345.123456`), именно это значение становится префиксом имени в BACKUP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaunchTimestamp(DateTime<Utc>);

impl LaunchTimestamp {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }
}

impl fmt::Display for LaunchTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:06}",
            self.0.timestamp(),
            self.0.timestamp_subsec_micros()
        )
    }
}

/// Имя файла в BACKUP: `<метка времени>_<исходное имя>`
pub fn archived_file_name(timestamp: &LaunchTimestamp, original: &OsStr) -> OsString {
    let mut name = OsString::from(timestamp.to_string());
    name.push("_");
    name.push(original);
    name
}

/// Запись об одном запуске: что запущено, с каким pid и куда перемещено
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    pub source: PathBuf,
    pub pid: Option<u32>,
    pub archived: Option<PathBuf>,
}

impl LaunchRecord {
    pub fn new(source: PathBuf, pid: Option<u32>) -> Self {
        Self {
            source,
            pid,
            archived: None,
        }
    }

    pub fn with_archive(mut self, archived: PathBuf) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn is_archived(&self) -> bool {
        self.archived.is_some()
    }
}

impl fmt::Display for LaunchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source.display())?;
        if let Some(pid) = self.pid {
            write!(f, " (pid {})", pid)?;
        }
        if let Some(archived) = &self.archived {
            write!(f, " -> {}", archived.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_timestamp() -> LaunchTimestamp {
        let datetime = Utc
            .timestamp_opt(1_697_712_345, 123_456_000)
            .single()
            .expect("valid timestamp");
        LaunchTimestamp::from_datetime(datetime)
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(fixed_timestamp().to_string(), "1697712345.123456");
    }

    #[test]
    fn test_timestamp_pads_micros() {
        let datetime = Utc
            .timestamp_opt(1_700_000_000, 5_000)
            .single()
            .expect("valid timestamp");
        assert_eq!(
            LaunchTimestamp::from_datetime(datetime).to_string(),
            "1700000000.000005"
        );
    }

    #[test]
    fn test_archived_file_name() {
        let name = archived_file_name(&fixed_timestamp(), OsStr::new("nitrogen.sh"));
        assert_eq!(name, OsString::from("1697712345.123456_nitrogen.sh"));
    }

    #[test]
    fn test_record_display() {
        let record = LaunchRecord::new(PathBuf::from("/tmp/auto/foo"), Some(42))
            .with_archive(PathBuf::from("/tmp/auto/BACKUP/1_foo"));

        assert!(record.is_archived());
        assert_eq!(
            record.to_string(),
            "/tmp/auto/foo (pid 42) -> /tmp/auto/BACKUP/1_foo"
        );
    }
}
