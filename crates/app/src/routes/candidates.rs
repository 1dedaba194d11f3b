use client::{PlateApi, ReviewQueue};
use dioxus::prelude::*;
use shared_ui::{
    Alert, AlertVariant, Button, ButtonVariant, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableHeader, DataTableRow, PageHeader, PageTitle, Skeleton,
};

use crate::auth::use_is_admin;
use crate::routes::AdminOnlyNotice;

/// Admin review queue for unconfirmed detections. Each row acts
/// independently; a verify or reject in flight only disables its own row.
#[component]
pub fn Candidates() -> Element {
    let api: PlateApi = use_context();
    let is_admin = use_is_admin();

    let mut queue = use_signal(ReviewQueue::default);
    let mut loading = use_signal(|| true);
    let mut error_msg = use_signal(|| Option::<String>::None);

    use_future({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                loading.set(true);
                match api.candidates().await {
                    Ok(list) => queue.write().replace(list),
                    Err(err) => error_msg.set(Some(err.user_message())),
                }
                loading.set(false);
            }
        }
    });

    if !is_admin {
        return rsx! { AdminOnlyNotice {} };
    }

    // One review action: verify promotes, reject discards. Success removes
    // the row; failure re-enables it.
    let review = move |id: i64, verify: bool| {
        let api = api.clone();
        if !queue.write().begin(id) {
            return;
        }
        spawn(async move {
            let result = if verify {
                api.verify_candidate(id).await
            } else {
                api.reject_candidate(id).await
            };
            match result {
                Ok(()) => queue.write().finish_success(id),
                Err(err) => {
                    queue.write().finish_failure(id);
                    error_msg.set(Some(err.user_message()));
                }
            }
        });
    };
    let entries = queue.read().entries().to_vec();

    rsx! {
        PageHeader {
            PageTitle { "Candidate Review" }
        }

        if let Some(err) = error_msg() {
            Alert { variant: AlertVariant::Error, "{err}" }
        }

        if loading() {
            Skeleton { rows: 4 }
        } else if entries.is_empty() {
            p { class: "empty-state", "No candidates waiting for review." }
        } else {
            DataTable {
                DataTableHeader {
                    DataTableColumn { "Plate" }
                    DataTableColumn { "Province" }
                    DataTableColumn { "Captured" }
                    DataTableColumn { "Image" }
                    DataTableColumn { "" }
                }
                DataTableBody {
                    for entry in entries {
                        {
                            let id = entry.record.id;
                            let busy = queue.read().is_processing(id);
                            let captured = entry.record.timestamp.format("%d/%m/%Y %H:%M").to_string();
                            let mut verify = review.clone();
                            let mut reject = review.clone();
                            rsx! {
                                DataTableRow { key: "{id}",
                                    DataTableCell { "{entry.record.plate_number}" }
                                    DataTableCell {
                                        {entry.record.province.clone().unwrap_or_else(|| "–".to_string())}
                                    }
                                    DataTableCell { "{captured}" }
                                    DataTableCell {
                                        if let Some(url) = entry.record.image_url.clone() {
                                            img { class: "plate-thumb", src: "{url}", alt: "candidate capture" }
                                        } else {
                                            "–"
                                        }
                                    }
                                    DataTableCell {
                                        div { class: "review-actions",
                                            Button {
                                                disabled: busy,
                                                onclick: move |_| verify(id, true),
                                                "Verify"
                                            }
                                            Button {
                                                variant: ButtonVariant::Destructive,
                                                disabled: busy,
                                                onclick: move |_| reject(id, false),
                                                "Reject"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
