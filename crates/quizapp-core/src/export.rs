// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Exporting results as images. The capture itself belongs to the front-end;
//! this module only knows which region to capture, under which filename, and
//! what to tell the user afterwards.

use serde::Serialize;

use crate::error::QuizError;

pub const SHARE_FALLBACK_NOTICE: &str = "Share not available, downloaded instead.";

/// A renderable region of the result screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// The score card on the end screen.
    FinalResult,
    /// The full per-question report.
    Report,
}

impl Region {
    /// DOM id of the element to capture.
    pub fn element_id(self) -> &'static str {
        match self {
            Region::FinalResult => "final-result",
            Region::Report => "report-screen",
        }
    }

    pub fn filename(self) -> &'static str {
        match self {
            Region::FinalResult => "my-result.png",
            Region::Report => "quiz-report.png",
        }
    }

    pub fn download_notice(self) -> &'static str {
        match self {
            Region::FinalResult => "Downloaded result PNG.",
            Region::Report => "Downloaded report PNG.",
        }
    }
}

/// Captures a region as an image. Capturing is asynchronous in the browser,
/// and the futures never leave the page's thread.
#[allow(async_fn_in_trait)]
pub trait Exporter {
    /// Save the image locally.
    async fn download(&mut self, region: Region, filename: &str) -> Result<(), QuizError>;
    /// Hand the image to the platform share sheet.
    async fn share(&mut self, region: Region, filename: &str) -> Result<(), QuizError>;
}

/// Result of an export request. Every variant carries a message suitable
/// for a dismissible notice; none of them is fatal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "notice", rename_all = "camelCase")]
pub enum ExportOutcome {
    Shared,
    Downloaded(String),
    /// Sharing failed; the image was downloaded instead.
    FellBack(String),
    Failed(String),
}

impl ExportOutcome {
    pub fn notice(&self) -> Option<&str> {
        match self {
            ExportOutcome::Shared => None,
            ExportOutcome::Downloaded(msg)
            | ExportOutcome::FellBack(msg)
            | ExportOutcome::Failed(msg) => Some(msg),
        }
    }

    /// Decide the outcome of a download attempt.
    pub fn from_download(region: Region, result: Result<(), QuizError>) -> Self {
        match result {
            Ok(()) => ExportOutcome::Downloaded(region.download_notice().to_string()),
            Err(e) => {
                log::warn!("Export of {} failed: {e}", region.element_id());
                ExportOutcome::Failed(e.to_string())
            }
        }
    }

    /// Decide the outcome after a failed share and the fallback download.
    pub fn from_fallback(region: Region, result: Result<(), QuizError>) -> Self {
        match result {
            Ok(()) => ExportOutcome::FellBack(SHARE_FALLBACK_NOTICE.to_string()),
            Err(e) => Self::from_download(region, Err(e)),
        }
    }
}

pub async fn download(exporter: &mut impl Exporter, region: Region) -> ExportOutcome {
    let result = exporter.download(region, region.filename()).await;
    ExportOutcome::from_download(region, result)
}

/// Try the share sheet, falling back to a plain download.
pub async fn share_or_download(exporter: &mut impl Exporter, region: Region) -> ExportOutcome {
    match exporter.share(region, region.filename()).await {
        Ok(()) => ExportOutcome::Shared,
        Err(e) => {
            log::info!("Share failed, downloading instead: {e}");
            let result = exporter.download(region, region.filename()).await;
            ExportOutcome::from_fallback(region, result)
        }
    }
}
