use chrono::Utc;
use client::{
    debounced, fetch_plates, last_n_days_query, Debouncer, PlateApi, PlateStore,
    SEARCH_DEBOUNCE_MS,
};
use dioxus::prelude::*;
use shared_types::{NewPlate, PlateRecord, SearchForm, SearchQuery};
use shared_ui::{
    Alert, AlertVariant, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent,
    CardHeader, CardTitle, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableHeader, DataTableRow, Dialog, DialogActions, Form, FormRow, FormSelect, Input,
    PageHeader, PageTitle, Pagination, SearchBar, Skeleton,
};

use crate::auth::use_is_admin;

/// Run one fetch against the store, fenced by its ticket.
async fn run_fetch(mut store: Signal<PlateStore>, api: PlateApi, query: SearchQuery) {
    let ticket = store.write().begin();
    let result = fetch_plates(&api, &query, api.default_limit()).await;
    store.write().apply(ticket, result, query);
}

/// The main dashboard: quick search, advanced search, quick date ranges,
/// and the paginated result table.
#[component]
pub fn PlatesDashboard() -> Element {
    let api: PlateApi = use_context();
    let is_admin = use_is_admin();

    let mut store = use_signal(|| PlateStore::new(25));
    let debouncer = use_hook(Debouncer::new);
    let mut quick = use_signal(String::new);
    let mut form = use_signal(SearchForm::default);
    let mut show_advanced = use_signal(|| false);
    let mut form_error = use_signal(|| Option::<String>::None);

    // Filter dropdown data; failures degrade to empty lists.
    let cameras = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.cameras().await.unwrap_or_default() }
        }
    });
    let provinces = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.provinces().await.unwrap_or_default() }
        }
    });

    // Initial load: latest records.
    use_future({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                run_fetch(store, api, SearchQuery::default()).await;
            }
        }
    });

    let on_quick_input = {
        let api = api.clone();
        let debouncer = debouncer.clone();
        move |e: FormEvent| {
            let value = e.value();
            quick.set(value.clone());
            let api = api.clone();
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                // Clearing the box reloads immediately, no debounce.
                debouncer.cancel();
                spawn(async move {
                    run_fetch(store, api, SearchQuery::default()).await;
                });
                return;
            }
            let ticket = debouncer.arm();
            let debouncer = debouncer.clone();
            spawn(async move {
                if !debounced(&debouncer, ticket, SEARCH_DEBOUNCE_MS).await {
                    return;
                }
                run_fetch(store, api, SearchQuery::term(trimmed)).await;
            });
        }
    };

    let run_range = {
        let api = api.clone();
        move |days: u32| {
            let api = api.clone();
            quick.set(String::new());
            spawn(async move {
                let query = last_n_days_query(Utc::now().date_naive(), days);
                run_fetch(store, api, query).await;
            });
        }
    };
    let mut range_7 = run_range.clone();
    let mut range_30 = run_range.clone();
    let mut range_today = run_range;

    let on_advanced_submit = {
        let api = api.clone();
        move |_| match form.read().build() {
            Ok(query) => {
                form_error.set(None);
                let api = api.clone();
                spawn(async move {
                    run_fetch(store, api, query).await;
                });
            }
            Err(err) => form_error.set(Some(err.message)),
        }
    };

    let loading = store.read().is_loading();
    let error = store.read().error().map(String::from);
    let page_rows: Vec<PlateRecord> = store.read().page().to_vec();
    let summary = store.read().last_query().summary();
    let pager = store.read().pager().clone();

    rsx! {
        PageHeader {
            PageTitle { "Detected Plates" }
        }

        SearchBar {
            Input {
                label: "Quick search",
                placeholder: "Plate number...",
                value: quick(),
                on_input: on_quick_input,
            }
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| range_today(1),
                "Today"
            }
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| range_7(7),
                "Last 7 days"
            }
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| range_30(30),
                "Last 30 days"
            }
            Button {
                variant: ButtonVariant::Secondary,
                onclick: move |_| {
                    let current = *show_advanced.peek();
                    show_advanced.set(!current);
                },
                if show_advanced() { "Hide advanced" } else { "Advanced search" }
            }
        }

        if show_advanced() {
            Card {
                CardHeader {
                    CardTitle { "Advanced search" }
                }
                CardContent {
                    if let Some(err) = form_error() {
                        Alert { variant: AlertVariant::Error, "{err}" }
                    }
                    Form { onsubmit: on_advanced_submit,
                        FormRow {
                            Input {
                                label: "Start date",
                                placeholder: "DD/MM/YYYY",
                                value: form().start_date,
                                on_input: move |e: FormEvent| form.write().start_date = e.value(),
                            }
                            Input {
                                label: "End date",
                                placeholder: "DD/MM/YYYY",
                                value: form().end_date,
                                on_input: move |e: FormEvent| form.write().end_date = e.value(),
                            }
                            Input {
                                label: "Start hour",
                                placeholder: "0-23",
                                value: form().start_hour,
                                on_input: move |e: FormEvent| form.write().start_hour = e.value(),
                            }
                            Input {
                                label: "End hour",
                                placeholder: "0-23",
                                value: form().end_hour,
                                on_input: move |e: FormEvent| form.write().end_hour = e.value(),
                            }
                        }
                        FormRow {
                            Input {
                                label: "Start month",
                                placeholder: "1-12",
                                value: form().start_month,
                                on_input: move |e: FormEvent| form.write().start_month = e.value(),
                            }
                            Input {
                                label: "End month",
                                placeholder: "1-12",
                                value: form().end_month,
                                on_input: move |e: FormEvent| form.write().end_month = e.value(),
                            }
                            Input {
                                label: "Start year",
                                placeholder: "e.g. 2023",
                                value: form().start_year,
                                on_input: move |e: FormEvent| form.write().start_year = e.value(),
                            }
                            Input {
                                label: "End year",
                                placeholder: "e.g. 2024",
                                value: form().end_year,
                                on_input: move |e: FormEvent| form.write().end_year = e.value(),
                            }
                        }
                        FormRow {
                            FormSelect {
                                label: "Province",
                                value: form().province,
                                onchange: move |e: Event<FormData>| form.write().province = e.value(),
                                option { value: "", "Any province" }
                                for province in provinces().unwrap_or_default() {
                                    option { value: "{province}", "{province}" }
                                }
                            }
                            FormSelect {
                                label: "Camera",
                                value: form().camera_id,
                                onchange: move |e: Event<FormData>| form.write().camera_id = e.value(),
                                option { value: "", "Any camera" }
                                for camera in cameras().unwrap_or_default() {
                                    option { value: "{camera.id}", "{camera.name}" }
                                }
                            }
                        }
                        Button { "Search" }
                    }
                }
            }
        }

        if !summary.is_empty() {
            div { class: "filter-summary",
                for (label, value) in summary {
                    Badge { variant: BadgeVariant::Outline, "{label}: {value}" }
                }
            }
        }

        if let Some(err) = error {
            Alert { variant: AlertVariant::Error, "{err}" }
        }

        if loading && page_rows.is_empty() {
            Skeleton { rows: 6 }
        } else if page_rows.is_empty() {
            p { class: "empty-state", "No plates match the current filters." }
        } else {
            DataTable {
                DataTableHeader {
                    DataTableColumn { "Plate" }
                    DataTableColumn { "Province" }
                    DataTableColumn { "Camera" }
                    DataTableColumn { "Captured" }
                    DataTableColumn { "Image" }
                    if is_admin {
                        DataTableColumn { "" }
                    }
                }
                DataTableBody {
                    for record in page_rows {
                        PlateRow { key: "{record.id}", record: record.clone(), store, can_delete: is_admin }
                    }
                }
            }
            Pagination {
                current_page: pager.current_page(),
                total_pages: pager.total_pages(),
                total_items: pager.total_items(),
                on_prev: move |_| store.write().pager_mut().prev_page(),
                on_next: move |_| store.write().pager_mut().next_page(),
            }
            div { class: "per-page",
                FormSelect {
                    label: "Per page",
                    value: "{pager.per_page()}",
                    onchange: move |e: Event<FormData>| {
                        if let Ok(size) = e.value().parse::<usize>() {
                            store.write().pager_mut().set_per_page(size);
                        }
                    },
                    option { value: "10", "10" }
                    option { value: "25", "25" }
                    option { value: "50", "50" }
                    option { value: "100", "100" }
                }
            }
        }

        if is_admin {
            AddPlateForm { store }
        }
    }
}

#[component]
fn PlateRow(record: PlateRecord, store: Signal<PlateStore>, can_delete: bool) -> Element {
    let api: PlateApi = use_context();
    let mut deleting = use_signal(|| false);
    let mut confirm_open = use_signal(|| false);

    let captured = record.timestamp.format("%d/%m/%Y %H:%M").to_string();
    let plate = if record.plate_number.is_empty() {
        "–".to_string()
    } else {
        record.plate_number.clone()
    };
    let id = record.id;

    let handle_delete = move |_| {
        confirm_open.set(false);
        let api = api.clone();
        spawn(async move {
            deleting.set(true);
            match api.delete(id).await {
                Ok(()) => {
                    let query = store.peek().last_query().clone();
                    run_fetch(store, api, query).await;
                }
                Err(err) => {
                    tracing::warn!(%err, id, "failed to delete plate");
                }
            }
            deleting.set(false);
        });
    };

    rsx! {
        DataTableRow {
            DataTableCell { "{plate}" }
            DataTableCell { {record.province.clone().unwrap_or_else(|| "–".to_string())} }
            DataTableCell {
                {record.camera_name.clone().unwrap_or_else(|| {
                    record.camera_id.map(|id| format!("#{id}")).unwrap_or_else(|| "–".to_string())
                })}
            }
            DataTableCell { "{captured}" }
            DataTableCell {
                if let Some(url) = record.image_url.clone() {
                    img { class: "plate-thumb", src: "{url}", alt: "plate capture" }
                } else {
                    "–"
                }
            }
            if can_delete {
                DataTableCell {
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: deleting(),
                        onclick: move |_| confirm_open.set(true),
                        "Delete"
                    }
                    Dialog {
                        open: confirm_open(),
                        on_close: move |_| confirm_open.set(false),
                        title: "Delete record",
                        p { "Delete plate \"{plate}\"? This cannot be undone." }
                        DialogActions {
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: move |_| confirm_open.set(false),
                                "Cancel"
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: handle_delete,
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Manual record entry, for corrections the recognizer missed.
#[component]
fn AddPlateForm(store: Signal<PlateStore>) -> Element {
    let api: PlateApi = use_context();
    let mut plate_number = use_signal(String::new);
    let mut province = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_add = move |_| {
        let api = api.clone();
        spawn(async move {
            let number = plate_number().trim().to_string();
            if number.is_empty() {
                error_msg.set(Some("Plate number is required".to_string()));
                return;
            }
            saving.set(true);
            error_msg.set(None);
            let body = NewPlate {
                plate_number: number,
                province: {
                    let p = province().trim().to_string();
                    (!p.is_empty()).then_some(p)
                },
                id_camera: None,
                camera_name: None,
            };
            match api.add(&body).await {
                Ok(_) => {
                    plate_number.set(String::new());
                    province.set(String::new());
                    let query = store.peek().last_query().clone();
                    run_fetch(store, api, query).await;
                }
                Err(err) => error_msg.set(Some(err.user_message())),
            }
            saving.set(false);
        });
    };

    rsx! {
        Card {
            CardHeader {
                CardTitle { "Add plate manually" }
            }
            CardContent {
                if let Some(err) = error_msg() {
                    Alert { variant: AlertVariant::Error, "{err}" }
                }
                Form { onsubmit: handle_add,
                    FormRow {
                        Input {
                            label: "Plate number",
                            placeholder: "e.g. 1กข234",
                            value: plate_number(),
                            on_input: move |e: FormEvent| plate_number.set(e.value()),
                        }
                        Input {
                            label: "Province",
                            placeholder: "Optional",
                            value: province(),
                            on_input: move |e: FormEvent| province.set(e.value()),
                        }
                    }
                    Button {
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Add" }
                    }
                }
            }
        }
    }
}
