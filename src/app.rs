use std::sync::Arc;

use anyhow::Result;
use dioxus::prelude::*;

use crate::config::Config;
use crate::infra::import::reader::FsFileSource;
use crate::infra::sink::build_sinks;
use crate::platform::desktop::dialog::pick_file;
use crate::ui::components::preview_table::PreviewTable;
use crate::ui::components::status_banner::{BannerKind, StatusBanner};
use crate::ui::state::app_state::{AppState, DocumentView, ImportView};
use crate::usecase::ports::source::FileSource;
use crate::usecase::services::document_service::DocumentService;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::preview_service::Preview;

const SECTION_STYLE: &str = "margin-bottom: 48px;";
const TITLE_STYLE: &str = "font-size: 24px; font-weight: 700; margin-bottom: 24px; color: #1f2937;";
const DROPZONE_STYLE: &str = "border: 2px dashed #d1d5db; border-radius: 8px; padding: 32px; text-align: center;";
const PICK_BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 8px 16px; border-radius: 6px; cursor: pointer; font-size: 15px;";
const HINT_STYLE: &str = "margin-top: 8px; font-size: 13px; color: #6b7280;";

/// Services shared by every page, provided through dioxus context.
#[derive(Clone)]
pub struct AppServices {
    pub import: Arc<ImportService>,
    pub documents: Arc<DocumentService>,
    pub preview_rows: usize,
}

impl AppServices {
    pub fn from_config(config: &Config) -> Result<Self> {
        let sinks = build_sinks(&config.sink)?;
        let source: Arc<dyn FileSource> = Arc::new(FsFileSource);

        Ok(Self {
            import: Arc::new(ImportService::new(
                source.clone(),
                sinks.rows,
                config.import.accepted_extensions(),
                config.import.decode_options(),
            )),
            documents: Arc::new(DocumentService::new(source, sinks.documents)),
            preview_rows: config.import.preview_limit(),
        })
    }
}

#[component]
pub fn App() -> Element {
    let AppState { import, document } = AppState::new();

    rsx! {
        div {
            style: "padding: 24px; max-width: 960px; margin: 0 auto; font-family: system-ui, sans-serif;",
            ImportSection { view: import }
            DocumentSection { view: document }
        }
    }
}

#[component]
fn ImportSection(mut view: Signal<ImportView>) -> Element {
    let services = use_context::<AppServices>();

    let (busy, phase_label, error, hint_after_error, upload, preview) = {
        let state = view.read();
        (
            state.is_busy(),
            state.phase.label(),
            state.error.clone(),
            state.error_hint(),
            state.upload.clone().filter(|upload| upload.succeeded),
            state
                .batch
                .as_ref()
                .map(|batch| Preview::of(batch, services.preview_rows)),
        )
    };
    let accepted = services.import.accepted().clone();
    let hint = format!("Supports {} files", accepted.describe());
    let import_service = services.import.clone();

    let on_pick = move |_: MouseEvent| {
        let Some(file) = pick_file("Spreadsheet", &accepted) else {
            return;
        };
        let generation = view.write().begin(&file.name);
        let service = import_service.clone();
        spawn(async move {
            let mut view = view;
            let attempt = service
                .run(generation, &file, |phase| view.write().observe(generation, phase))
                .await;
            view.write().finish(attempt);
        });
    };

    rsx! {
        section {
            style: SECTION_STYLE,
            h1 { style: TITLE_STYLE, "Import Excel Data" }
            div {
                style: DROPZONE_STYLE,
                button {
                    style: PICK_BUTTON_STYLE,
                    disabled: busy,
                    onclick: on_pick,
                    if busy { "{phase_label}" } else { "Choose a file to import" }
                }
                p { style: HINT_STYLE, "{hint}" }
            }
            if let Some(message) = error {
                StatusBanner { kind: BannerKind::Error, message }
            }
            if let Some(next_step) = hint_after_error {
                p { style: HINT_STYLE, "{next_step}" }
            }
            if let Some(upload) = upload {
                StatusBanner {
                    kind: BannerKind::Success,
                    message: format!("{} ({} rows)", upload.message, upload.row_count),
                }
            }
            if let Some(preview) = preview {
                PreviewTable { preview }
            }
        }
    }
}

#[component]
fn DocumentSection(mut view: Signal<DocumentView>) -> Element {
    let services = use_context::<AppServices>();

    let (busy, phase_label, error, hint_after_error, uploaded, summary) = {
        let state = view.read();
        (
            state.is_busy(),
            state.phase.label(),
            state.error.clone(),
            state.error_hint(),
            state.uploaded(),
            state.document.as_ref().map(|document| document.label()),
        )
    };
    let accepted = services.documents.accepted().clone();
    let document_service = services.documents.clone();

    let on_pick = move |_: MouseEvent| {
        let Some(file) = pick_file("PDF", &accepted) else {
            return;
        };
        let generation = view.write().begin();
        let service = document_service.clone();
        spawn(async move {
            let mut view = view;
            let attempt = service
                .run(generation, &file, |phase| view.write().observe(generation, phase))
                .await;
            view.write().finish(attempt);
        });
    };

    rsx! {
        section {
            style: SECTION_STYLE,
            h1 { style: TITLE_STYLE, "Upload PDF Document" }
            div {
                style: DROPZONE_STYLE,
                button {
                    style: PICK_BUTTON_STYLE,
                    disabled: busy,
                    onclick: on_pick,
                    if busy { "{phase_label}" } else { "Choose a PDF to upload" }
                }
                p { style: HINT_STYLE, "Supports PDF files only" }
            }
            if let Some(message) = error {
                StatusBanner { kind: BannerKind::Error, message }
            }
            if let Some(next_step) = hint_after_error {
                p { style: HINT_STYLE, "{next_step}" }
            }
            if uploaded {
                StatusBanner {
                    kind: BannerKind::Success,
                    message: "PDF uploaded successfully!".to_string(),
                }
            }
            if let Some(label) = summary {
                div {
                    style: "margin-top: 32px;",
                    h2 {
                        style: "font-size: 20px; font-weight: 600; margin-bottom: 8px; color: #1f2937;",
                        "PDF Preview"
                    }
                    p { style: HINT_STYLE, "{label}" }
                }
            }
        }
    }
}
