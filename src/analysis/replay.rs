//! Offline analysis service serving recorded responses.

use super::{AnalysisService, DocumentLocation};
use crate::error::{Error, Result};
use crate::model::AnalysisPage;
use std::fs;
use std::path::{Path, PathBuf};

/// [`AnalysisService`] that answers from recorded response files.
///
/// For an object named `report.pdf` the recording is `<dir>/report.json`,
/// holding either one response object or an array of response pages. The
/// job identifier is the object name. Continuation tokens are page indexes;
/// recorded `NextToken` values are replaced so the pages chain in file order.
#[derive(Debug, Clone)]
pub struct ReplayService {
    dir: PathBuf,
}

impl ReplayService {
    /// Serve recordings from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the recording for an object name.
    pub fn recording_path(&self, name: &str) -> PathBuf {
        let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        self.dir.join(format!("{}.json", stem))
    }

    fn load(&self, job_id: &str) -> Result<Vec<AnalysisPage>> {
        let path = self.recording_path(job_id);
        let data = fs::read_to_string(&path)
            .map_err(|e| Error::Service(format!("no recording at {}: {}", path.display(), e)))?;
        load_pages(&data)
    }
}

impl AnalysisService for ReplayService {
    fn start_analysis(&self, location: &DocumentLocation) -> Result<String> {
        let path = self.recording_path(&location.name);
        if !path.is_file() {
            return Err(Error::Service(format!(
                "no recording for {} at {}",
                location,
                path.display()
            )));
        }
        Ok(location.name.clone())
    }

    fn get_analysis(&self, job_id: &str, next_token: Option<&str>) -> Result<AnalysisPage> {
        let mut pages = self.load(job_id)?;
        let index = match next_token {
            None => 0,
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| Error::Service(format!("invalid continuation token: {}", token)))?,
        };
        if index >= pages.len() {
            return Err(Error::Service(format!(
                "page {} out of range for job {} ({} pages)",
                index,
                job_id,
                pages.len()
            )));
        }

        let count = pages.len();
        let mut page = pages.swap_remove(index);
        page.next_token = (index + 1 < count).then(|| (index + 1).to_string());
        Ok(page)
    }
}

/// Decode a recorded response: one page object or an array of pages.
pub fn load_pages(data: &str) -> Result<Vec<AnalysisPage>> {
    let value: serde_json::Value = serde_json::from_str(data)?;
    let pages = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(pages)
}
