use super::{api, storage};
use chrono::Utc;
use contracts::usecases::u601_inventory_csv_upload::{
    BulkUpdatePayload, CachedUpload, DroppedLine, ParseCsvResponse, ReviewTable, SelectableRow,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

use crate::shared::toast::use_toaster;
use crate::system::auth::credentials::use_credentials;

/// Пауза перед переходом после успешной отправки
pub const REDIRECT_DELAY_MS: u32 = 2000;

/// Куда уходим после успешной отправки
const REDIRECT_TARGET: &str = "/inventory";

fn redirect_to(target: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(target) {
            log::error!("redirect to {} failed: {:?}", target, e);
        }
    }
}

fn input_from_event(ev: &leptos::ev::Event) -> Option<HtmlInputElement> {
    ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
}

async fn read_file_text(file: &web_sys::File) -> Result<String, String> {
    let value = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("No se pudo leer el archivo: {:?}", e))?;
    value
        .as_string()
        .ok_or_else(|| "El archivo no es texto".to_string())
}

#[component]
pub fn InventoryCsvUploadPage() -> impl IntoView {
    let toaster = use_toaster();
    let credentials = use_credentials();

    let table = RwSignal::new(ReviewTable::default());
    let upload_id = RwSignal::new(None::<String>);
    let file_name = RwSignal::new(String::new());
    let dropped = RwSignal::new(Vec::<DroppedLine>::new());
    let not_found = RwSignal::new(0usize);
    let (is_parsing, set_is_parsing) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);

    let apply_parsed = move |resp: ParseCsvResponse| {
        not_found.set(resp.not_found);
        dropped.set(resp.dropped.clone());
        file_name.set(resp.file_name.clone());
        upload_id.set(Some(resp.upload_id.clone()));
        let review = ReviewTable::new(resp.rows);
        table.set(review.clone());
        CachedUpload {
            upload_id: resp.upload_id,
            file_name: resp.file_name,
            table: review,
            dropped: resp.dropped,
            not_found: resp.not_found,
            saved_at: Utc::now(),
        }
    };

    // Восстановить последнюю загрузку из кэша
    Effect::new(move || {
        if let Some(cached) = storage::load_upload() {
            log::debug!(
                "restored upload {} ({} rows)",
                cached.upload_id,
                cached.table.len()
            );
            file_name.set(cached.file_name);
            upload_id.set(Some(cached.upload_id));
            dropped.set(cached.dropped);
            not_found.set(cached.not_found);
            table.set(cached.table);
        }
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let Some(input) = input_from_event(&ev) else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // чтобы повторный выбор того же файла снова вызвал change
        input.set_value("");

        set_is_parsing.set(true);
        spawn_local(async move {
            let name = file.name();
            let result = match read_file_text(&file).await {
                Ok(text) => api::parse_csv(name, text).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(resp) => {
                    let rows = resp.rows.len();
                    let missing = resp.not_found;
                    storage::save_upload(&apply_parsed(resp));
                    if missing > 0 {
                        toaster.info(format!(
                            "{} filas cargadas, {} no encontradas en el catálogo",
                            rows, missing
                        ));
                    } else {
                        toaster.success(format!("{} filas cargadas", rows));
                    }
                }
                Err(e) => {
                    log::error!("csv parse failed: {}", e);
                    toaster.error(format!("Error al procesar el archivo: {}", e));
                }
            }
            set_is_parsing.set(false);
        });
    };

    let on_submit = move |_| {
        if is_submitting.get_untracked() {
            return;
        }
        let Some(token) = credentials.access_token() else {
            toaster.error("Sesión no encontrada. Inicie sesión nuevamente.");
            return;
        };
        let payload = match table.with_untracked(BulkUpdatePayload::assemble) {
            Ok(payload) => payload,
            Err(e) => {
                toaster.error(format!("No se puede enviar: {}", e));
                return;
            }
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            match api::submit(&payload, &token).await {
                Ok(resp) => {
                    log::info!("bulk inventory update sent: {} items", resp.submitted);
                    toaster.success("Inventario actualizado correctamente");
                    table.update(|t| t.reset_after_submit());
                    storage::clear_upload();
                    gloo_timers::future::TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                    redirect_to(REDIRECT_TARGET);
                }
                Err(e) => {
                    // таблицу не трогаем, можно повторить
                    log::error!("bulk inventory update failed: {}", e);
                    toaster.error(format!("Error al actualizar el inventario: {}", e));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let on_clear = move |_| {
        table.set(ReviewTable::default());
        upload_id.set(None);
        file_name.set(String::new());
        dropped.set(Vec::new());
        not_found.set(0);
        storage::clear_upload();
    };

    let all_selected = move || table.with(|t| !t.is_empty() && t.selected_count() == t.len());

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Carga de inventario (CSV)"</h1>
                </div>
            </div>

            <div style="display:flex;flex-direction:column;gap:16px;margin-top:16px;">
                <Card>
                    <Flex vertical=false gap=FlexGap::Large align=FlexAlign::Center>
                        <label class="form__label">"Archivo CSV"</label>
                        <input
                            type="file"
                            accept=".csv,text/csv"
                            disabled=move || is_parsing.get() || is_submitting.get()
                            on:change=on_file_change
                        />
                        {move || {
                            if is_parsing.get() {
                                view! { <span class="form__hint">"Procesando..."</span> }.into_any()
                            } else if !file_name.get().is_empty() {
                                view! { <span class="form__hint">{file_name.get()}</span> }.into_any()
                            } else {
                                view! { <></> }.into_any()
                            }
                        }}
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=on_clear
                            disabled=move || upload_id.get().is_none() || is_submitting.get()
                        >
                            "Limpiar"
                        </Button>
                    </Flex>
                </Card>

                {move || {
                    let lines = dropped.get();
                    if lines.is_empty() {
                        return view! { <></> }.into_any();
                    }
                    view! {
                        <div style="padding:8px 12px;border-radius:var(--radius-md);border-left:3px solid var(--color-warning);background:var(--color-warning-50);font-size:var(--font-size-sm);max-height:120px;overflow-y:auto;">
                            <div>{format!("{} línea(s) ignorada(s)", lines.len())}</div>
                            {lines.into_iter().map(|l| view! {
                                <div>{format!("#{}: {} ({})", l.line_number, l.reason, l.content)}</div>
                            }).collect_view()}
                        </div>
                    }.into_any()
                }}

                {move || {
                    let missing = not_found.get();
                    (missing > 0).then(|| view! {
                        <div class="form__hint">
                            {format!("{} producto(s) no encontrado(s)", missing)}
                        </div>
                    })
                }}

                <table class="table__data">
                    <thead>
                        <tr>
                            <th>
                                <input
                                    type="checkbox"
                                    prop:checked=all_selected
                                    on:change=move |ev| {
                                        let checked = input_from_event(&ev)
                                            .map(|i| i.checked())
                                            .unwrap_or(false);
                                        table.update(|t| t.select_all(checked));
                                    }
                                />
                            </th>
                            <th>"UUID"</th>
                            <th>"Producto"</th>
                            <th>"Presentación"</th>
                            <th>"Vencimiento"</th>
                            <th>"Cantidad"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each={move || (0..table.with(|t| t.len())).collect::<Vec<_>>()}
                            key=|i| *i
                            children=move |i| {
                                let cell = move |f: fn(&SelectableRow) -> String| {
                                    move || table.with(|t| t.get(i).map(f).unwrap_or_default())
                                };
                                let is_found = move || table.with(|t| t.get(i).map(|r| r.row.is_found()).unwrap_or(false));
                                let quantity = cell(|r| r.quantity.clone());
                                view! {
                                    <tr class=("table__row--missing", move || !is_found())>
                                        <td>
                                            <input
                                                type="checkbox"
                                                prop:checked=move || table.with(|t| t.get(i).map(|r| r.selected).unwrap_or(false))
                                                on:change=move |_| table.update(|t| { t.toggle(i); })
                                            />
                                        </td>
                                        <td style="font-family:monospace;">{cell(|r| r.row.uuid().to_string())}</td>
                                        <td>{cell(|r| r.row.product_name().to_string())}</td>
                                        <td>{cell(|r| r.row.presentation_name().to_string())}</td>
                                        <td>{cell(|r| r.row.row.expiration_date.clone())}</td>
                                        <td>
                                            <input
                                                type="text"
                                                inputmode="numeric"
                                                class="doc-filter__input"
                                                prop:value=quantity
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    let applied = table
                                                        .try_update(|t| t.edit_quantity(i, &value))
                                                        .unwrap_or(false);
                                                    if !applied {
                                                        // вернуть прежнее значение в поле
                                                        if let Some(input) = input_from_event(&ev) {
                                                            input.set_value(&quantity());
                                                        }
                                                    }
                                                }
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>

                <Flex vertical=false gap=FlexGap::Large align=FlexAlign::Center>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_submit
                        disabled=move || !table.with(|t| t.can_submit()) || is_submitting.get()
                    >
                        {move || if is_submitting.get() { "Enviando..." } else { "Actualizar inventario" }}
                    </Button>
                    <span style="font-size:var(--font-size-sm);color:var(--color-text-secondary);">
                        {move || format!("{} seleccionada(s)", table.with(|t| t.selected_count()))}
                    </span>
                    {move || table.with(|t| t.blocking_reason()).map(|reason| view! {
                        <span style="font-size:var(--font-size-sm);color:var(--color-error);">
                            {reason.message()}
                        </span>
                    })}
                </Flex>
            </div>
        </div>
    }
}
