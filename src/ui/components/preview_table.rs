use dioxus::prelude::*;

use crate::usecase::services::preview_service::Preview;

const HEADER_CELL_STYLE: &str = "padding: 10px 16px; text-align: left; font-size: 12px; font-weight: 600; color: #6b7280; text-transform: uppercase; letter-spacing: 0.05em; border-bottom: 1px solid #e5e7eb; white-space: nowrap;";
const BODY_CELL_STYLE: &str =
    "padding: 12px 16px; font-size: 14px; color: #4b5563; border-bottom: 1px solid #f3f4f6; white-space: nowrap;";

#[component]
pub fn PreviewTable(preview: Preview) -> Element {
    if preview.is_empty() {
        return rsx! {};
    }
    let hidden = preview.hidden_rows();
    let shown = preview.rows.len();
    let total = preview.total_rows;
    let source = preview.source.clone();

    rsx! {
        div {
            style: "margin-top: 32px;",
            h2 {
                style: "font-size: 20px; font-weight: 600; margin-bottom: 16px; color: #1f2937;",
                "Imported Data Preview"
            }
            if !source.is_empty() {
                p {
                    style: "margin-bottom: 8px; font-size: 13px; color: #6b7280;",
                    "From {source}"
                }
            }
            div {
                style: "overflow-x: auto; border: 1px solid #e5e7eb; border-radius: 8px;",
                table {
                    style: "min-width: 100%; border-collapse: collapse;",
                    thead {
                        style: "background: #f9fafb;",
                        tr {
                            for header in preview.headers.iter() {
                                th { style: HEADER_CELL_STYLE, "{header}" }
                            }
                        }
                    }
                    tbody {
                        for row in preview.rows.iter() {
                            tr {
                                for cell in row.iter() {
                                    td { style: BODY_CELL_STYLE, "{cell}" }
                                }
                            }
                        }
                    }
                }
            }
            if hidden > 0 {
                p {
                    style: "margin-top: 8px; font-size: 13px; color: #6b7280;",
                    "Showing {shown} of {total} rows"
                }
            }
        }
    }
}
