//! Image upload panel state: chosen file, preview, progress and outcome.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use canvas::consts::TILE_PX;
use canvas::grid::CellRect;
use canvas::update::UpdateReport;

/// Shown when the pre-submit ownership lookup fails.
pub const OWNERSHIP_CHECK_FAILED: &str = "Failed to verify pixel ownership. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadState {
    pub file_name: Option<String>,
    /// Object URL of the chosen file for the preview image.
    pub preview_url: Option<String>,
    /// Raw file bytes, decoded only when submitting.
    pub bytes: Option<Vec<u8>>,
    pub error: Option<String>,
    pub busy: bool,
    /// `(done, total)` while submitting.
    pub progress: Option<(usize, usize)>,
    pub report: Option<UpdateReport>,
}

impl UploadState {
    /// A new file was chosen and read. Returns the replaced preview URL,
    /// which the caller must revoke.
    pub fn set_file(&mut self, name: String, preview_url: Option<String>, bytes: Vec<u8>) -> Option<String> {
        let released = std::mem::replace(&mut self.preview_url, preview_url);
        self.file_name = Some(name);
        self.bytes = Some(bytes);
        self.error = None;
        self.report = None;
        released
    }

    /// The chosen file was rejected before reading. Returns the dropped
    /// preview URL, which the caller must revoke.
    pub fn reject_file(&mut self, error: String) -> Option<String> {
        self.file_name = None;
        self.bytes = None;
        self.error = Some(error);
        self.preview_url.take()
    }

    pub fn begin_submit(&mut self) {
        self.busy = true;
        self.error = None;
        self.report = None;
        self.progress = None;
    }

    /// Submission stopped before any cell was sent.
    pub fn abort(&mut self, error: String) {
        self.busy = false;
        self.progress = None;
        self.error = Some(error);
    }

    pub fn on_progress(&mut self, index: usize, total: usize) {
        self.progress = Some((index, total));
    }

    /// Record the outcome. A complete success clears the chosen file and
    /// returns its preview URL, which the caller must revoke.
    pub fn finish(&mut self, report: UpdateReport) -> Option<String> {
        self.busy = false;
        self.progress = None;
        let released = if report.is_complete_success() {
            self.bytes = None;
            self.file_name = None;
            self.preview_url.take()
        } else {
            None
        };
        self.report = Some(report);
        released
    }

    pub fn can_submit(&self) -> bool {
        self.bytes.is_some() && !self.busy
    }

    pub fn progress_label(&self) -> Option<String> {
        self.progress
            .map(|(index, total)| format!("Updating pixel {} of {total}...", index + 1))
    }

    /// Outcome line for the last submission.
    pub fn result_message(&self) -> Option<String> {
        let report = self.report.as_ref()?;
        if report.is_complete_success() {
            Some(format!("Image uploaded successfully! Updated {} pixel(s)", report.succeeded.len()))
        } else {
            Some(report.summary())
        }
    }
}

/// Preview size in CSS pixels: the target rectangle at tile resolution.
pub fn preview_size(rect: CellRect) -> (u32, u32) {
    (rect.width() * TILE_PX, rect.height() * TILE_PX)
}
