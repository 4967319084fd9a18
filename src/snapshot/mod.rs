//! Daily snapshot files and directory conventions.
//!
//! A workspace root holds:
//!
//! ```text
//! data/MM-DD-YYYY.txt     one record per line
//! images/MM-DD-YYYY/      source images and generated atlases
//! files/MM-DD-YYYY/       exported scene files
//! ```

pub mod order;
pub mod record;

pub use order::{parse_order, OrderConfig};
pub use record::{parse_record, parse_records, Record};

use crate::error::{AtlasError, Result};
use crate::types::OrderList;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Date format used in snapshot file and directory names.
pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// Format a date as `MM-DD-YYYY`.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse the date out of a `MM-DD-YYYY[.txt]` name.
pub fn parse_date_stamp(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(".txt").unwrap_or(name);
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}

/// Today's local date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Root directory of the dated data/images/files layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    /// `data/MM-DD-YYYY.txt`
    pub fn data_file(&self, date: NaiveDate) -> PathBuf {
        self.data_dir().join(format!("{}.txt", date_stamp(date)))
    }

    /// `images/MM-DD-YYYY/`
    pub fn images_dir(&self, date: NaiveDate) -> PathBuf {
        self.root.join("images").join(date_stamp(date))
    }

    /// `files/MM-DD-YYYY/`
    pub fn files_dir(&self, date: NaiveDate) -> PathBuf {
        self.root.join("files").join(date_stamp(date))
    }

    /// Create `files/MM-DD-YYYY/` if needed and return it.
    pub fn ensure_files_dir(&self, date: NaiveDate) -> Result<PathBuf> {
        let dir = self.files_dir(date);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// The data file for `date`, which must exist.
    pub fn order_file(&self, date: NaiveDate) -> Result<PathBuf> {
        let path = self.data_file(date);
        if path.is_file() {
            Ok(path)
        } else {
            Err(AtlasError::MissingOrderFile(path))
        }
    }

    /// Read and parse the order list for `date`.
    pub fn read_order(&self, date: NaiveDate, config: &OrderConfig) -> Result<OrderList> {
        let text = std::fs::read_to_string(self.order_file(date)?)?;
        parse_order(&text, config)
    }

    /// Read and parse the records for `date`, skipping malformed lines.
    pub fn read_records(&self, date: NaiveDate) -> Result<Vec<Record>> {
        let text = std::fs::read_to_string(self.order_file(date)?)?;
        Ok(parse_records(&text))
    }

    /// All `.txt` files in `data/`.
    fn data_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.data_dir();
        if !dir.is_dir() {
            return Err(AtlasError::MissingDirectory(dir));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().map(|e| e == "txt").unwrap_or(false) {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// The data file for `date`, or else the most recently modified `.txt`
    /// file in `data/`.
    pub fn latest_data_file(&self, date: NaiveDate) -> Result<PathBuf> {
        let preferred = self.data_file(date);
        if preferred.is_file() {
            return Ok(preferred);
        }

        let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
        for path in self.data_files()? {
            let modified = std::fs::metadata(&path)?.modified()?;
            let is_newer = match &newest {
                Some((best, best_path)) => modified > *best || (modified == *best && path > *best_path),
                None => true,
            };
            if is_newer {
                newest = Some((modified, path));
            }
        }

        match newest {
            Some((_, path)) => {
                log::info!("No data file for {}, using {}", date_stamp(date), path.display());
                Ok(path)
            }
            None => Err(AtlasError::NoDataFiles(self.data_dir())),
        }
    }

    /// The latest dated data file strictly before `date`, if any.
    pub fn previous_data_file(&self, date: NaiveDate) -> Result<Option<(NaiveDate, PathBuf)>> {
        let previous = self
            .data_files()?
            .into_iter()
            .filter_map(|path| {
                let stamp = path.file_name()?.to_str()?;
                parse_date_stamp(stamp).map(|d| (d, path))
            })
            .filter(|(d, _)| *d < date)
            .max_by_key(|(d, _)| *d);
        Ok(previous)
    }

    /// Records of the latest snapshot before `date`, or empty when there is none.
    pub fn read_previous_records(&self, date: NaiveDate) -> Result<Vec<Record>> {
        match self.previous_data_file(date)? {
            Some((_, path)) => Ok(parse_records(&std::fs::read_to_string(path)?)),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn workspace_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Workspace) {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        for (name, contents) in files {
            std::fs::write(data.join(name), contents).unwrap();
        }
        let ws = Workspace::new(dir.path());
        (dir, ws)
    }

    #[test]
    fn test_date_stamps() {
        assert_eq!(date_stamp(date(2026, 3, 7)), "03-07-2026");
        assert_eq!(parse_date_stamp("03-07-2026.txt"), Some(date(2026, 3, 7)));
        assert_eq!(parse_date_stamp("12-31-2025"), Some(date(2025, 12, 31)));
        assert_eq!(parse_date_stamp("notes.txt"), None);
    }

    #[test]
    fn test_layout_paths() {
        let ws = Workspace::new("/srv/viz");
        let d = date(2026, 10, 17);
        assert_eq!(ws.data_file(d), PathBuf::from("/srv/viz/data/10-17-2026.txt"));
        assert_eq!(ws.images_dir(d), PathBuf::from("/srv/viz/images/10-17-2026"));
        assert_eq!(ws.files_dir(d), PathBuf::from("/srv/viz/files/10-17-2026"));
    }

    #[test]
    fn test_ensure_files_dir() {
        let (_dir, ws) = workspace_with(&[]);
        let d = date(2026, 10, 17);
        assert!(!ws.files_dir(d).exists());

        let created = ws.ensure_files_dir(d).unwrap();
        assert_eq!(created, ws.files_dir(d));
        assert!(created.is_dir());
        // Idempotent.
        assert_eq!(ws.ensure_files_dir(d).unwrap(), created);
    }

    #[test]
    fn test_order_file_missing() {
        let (_dir, ws) = workspace_with(&[]);
        assert!(matches!(
            ws.order_file(date(2026, 1, 1)),
            Err(AtlasError::MissingOrderFile(_))
        ));
    }

    #[test]
    fn test_read_order_and_records() {
        let (_dir, ws) = workspace_with(&[("10-17-2026.txt", "Bitcoin: 100\nEther eum: **2B 5**\n")]);
        let d = date(2026, 10, 17);

        let order = ws.read_order(d, &OrderConfig::default()).unwrap();
        assert_eq!(order.len(), 2);
        assert_eq!(order.get(1).unwrap().as_str(), "Ether_eum");

        let records = ws.read_records(d).unwrap();
        assert_eq!(records[1].market_cap(), Some(2e9));
    }

    #[test]
    fn test_latest_data_file_prefers_date() {
        let (_dir, ws) = workspace_with(&[("10-16-2026.txt", "a: 1"), ("10-17-2026.txt", "a: 2")]);
        let path = ws.latest_data_file(date(2026, 10, 17)).unwrap();
        assert!(path.ends_with("10-17-2026.txt"));
    }

    #[test]
    fn test_latest_data_file_falls_back_to_newest() {
        let (dir, ws) = workspace_with(&[("old.txt", "a: 1"), ("new.txt", "a: 2")]);
        let an_hour_ago = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
        std::fs::File::options()
            .write(true)
            .open(dir.path().join("data").join("old.txt"))
            .unwrap()
            .set_modified(an_hour_ago)
            .unwrap();

        let path = ws.latest_data_file(date(2030, 1, 1)).unwrap();
        assert!(path.ends_with("new.txt"));
    }

    #[test]
    fn test_latest_data_file_errors() {
        let (_dir, ws) = workspace_with(&[]);
        assert!(matches!(
            ws.latest_data_file(date(2026, 1, 1)),
            Err(AtlasError::NoDataFiles(_))
        ));

        let bare = tempfile::tempdir().unwrap();
        let ws = Workspace::new(bare.path());
        assert!(matches!(
            ws.latest_data_file(date(2026, 1, 1)),
            Err(AtlasError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_previous_data_file() {
        let (_dir, ws) = workspace_with(&[
            ("10-15-2026.txt", "a: 1"),
            ("10-16-2026.txt", "a: 2"),
            ("10-17-2026.txt", "a: 3"),
            ("notes.txt", "ignored"),
        ]);

        let (d, path) = ws.previous_data_file(date(2026, 10, 17)).unwrap().unwrap();
        assert_eq!(d, date(2026, 10, 16));
        assert!(path.ends_with("10-16-2026.txt"));
        assert!(ws.previous_data_file(date(2026, 10, 15)).unwrap().is_none());

        let previous = ws.read_previous_records(date(2026, 10, 17)).unwrap();
        assert_eq!(previous[0].value(), 2.0);
    }
}
