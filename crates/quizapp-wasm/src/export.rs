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

//! Image export through the page's `quizExport` object.
//!
//! The page provides `quizExport.download(elementId, filename)` and
//! `quizExport.share(elementId, filename)`, each returning a promise that
//! resolves to `false` (or rejects) when no image could be produced.

use js_sys::Promise;
use quizapp_core::error::QuizError;
use quizapp_core::export::ExportOutcome;
use quizapp_core::export::Exporter;
use quizapp_core::export::Region;
use quizapp_core::export::download;
use quizapp_core::export::share_or_download;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::console;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = quizExport, js_name = download, catch)]
    fn js_download(element_id: &str, filename: &str) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = quizExport, js_name = share, catch)]
    fn js_share(element_id: &str, filename: &str) -> Result<Promise, JsValue>;
}

/// Captures through the page's `quizExport` object.
struct PageExporter;

async fn capture(promise: Result<Promise, JsValue>) -> Result<(), QuizError> {
    let promise = promise.map_err(|e| QuizError::Export(format!("{e:?}")))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| QuizError::Export(format!("{e:?}")))?;
    if value.as_bool() == Some(false) {
        return Err(QuizError::Export("failed to capture".to_string()));
    }
    Ok(())
}

impl Exporter for PageExporter {
    async fn download(&mut self, region: Region, filename: &str) -> Result<(), QuizError> {
        capture(js_download(region.element_id(), filename)).await
    }

    async fn share(&mut self, region: Region, filename: &str) -> Result<(), QuizError> {
        let result = capture(js_share(region.element_id(), filename)).await;
        if let Err(e) = &result {
            console::warn_1(&format!("{e}").into());
        }
        result
    }
}

pub async fn export(region: Region, share: bool) -> ExportOutcome {
    let mut exporter = PageExporter;
    if share {
        share_or_download(&mut exporter, region).await
    } else {
        download(&mut exporter, region).await
    }
}
