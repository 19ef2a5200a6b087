use crate::components::fetch::{load_into, run_action};
use crate::components::toast::use_toast;
use crate::session::use_session;
use crate::web::file::{json_object_url, read_file, revoke_object_url, selected_file};
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tradepanel_shared::protocol::{DEFAULT_LOG_LINES, GetLogs};
use tradepanel_shared::SystemStatus;

const LOG_SERVICES: [&str; 4] = ["", "lean-engine", "webui-backend", "ml-runtime"];

#[component]
fn SystemStatusCard(status: RwSignal<Option<SystemStatus>>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"System status"</h3>
                {move || match status.get() {
                    None => view! { <span class="loading loading-spinner"></span> }.into_any(),
                    Some(s) => {
                        let healthy = s.status == "healthy" || s.status == "ok";
                        let services = s
                            .services
                            .as_object()
                            .map(|m| {
                                m.iter()
                                    .map(|(name, state)| {
                                        let state = state.as_str().map(str::to_string).unwrap_or_else(|| state.to_string());
                                        (name.clone(), state)
                                    })
                                    .collect::<Vec<_>>()
                            })
                            .unwrap_or_default();
                        view! {
                            <div class="flex items-center gap-2">
                                <span class=if healthy { "badge badge-success" } else { "badge badge-warning" }>{s.status}</span>
                                <span class="text-sm opacity-60">
                                    {s.timestamp.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())}
                                </span>
                            </div>
                            <ul class="mt-2 space-y-1">
                                {services
                                    .into_iter()
                                    .map(|(name, state)| view! {
                                        <li class="flex justify-between">
                                            <span class="font-mono">{name}</span>
                                            <span>{state}</span>
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();

    // --- 系统状态 ---
    let status = RwSignal::new(Option::<SystemStatus>::None);
    let status_loading = RwSignal::new(false);
    load_into(toast, status_loading, status, "Failed to load system status", async move {
        session.api().system_status().await.map(Some)
    });

    // --- 日志 ---
    let service = RwSignal::new(String::new());
    let lines = RwSignal::new(DEFAULT_LOG_LINES);
    let logs = RwSignal::new(Vec::<String>::new());
    let logs_loading = RwSignal::new(false);

    let load_logs = move || {
        let service = service.get_untracked();
        let query = GetLogs {
            service: (!service.is_empty()).then_some(service),
            lines: lines.get_untracked(),
        };
        load_into(toast, logs_loading, logs, "Failed to load logs", async move {
            session.api().logs(&query).await.map(|l| l.lines)
        });
    };
    load_logs();

    // --- 导出 ---
    let export_url = RwSignal::new(Option::<String>::None);
    let on_export = move |_: leptos::ev::MouseEvent| {
        run_action(
            toast,
            "Export failed",
            async move { session.api().export_data().await },
            move |data| {
                let json = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
                let Some(url) = json_object_url(&json) else {
                    toast.error("Export failed: could not prepare download");
                    return;
                };
                if let Some(old) = export_url.get_untracked() {
                    revoke_object_url(&old);
                }
                export_url.set(Some(url));
                toast.success("Export ready");
            },
        );
    };
    on_cleanup(move || {
        if let Some(url) = export_url.try_get_untracked().flatten() {
            revoke_object_url(&url);
        }
    });

    // --- 导入 ---
    let file_ref = NodeRef::<Input>::new();
    let importing = RwSignal::new(false);
    let on_import = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(file) = file_ref.get().as_ref().and_then(selected_file) else {
            toast.error("Choose a file to import");
            return;
        };
        importing.set(true);
        spawn_local(async move {
            let result = match read_file(&file).await {
                Ok(upload) => session.api().import_data(upload).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(res) => toast.success(res.message.unwrap_or_else(|| "Import completed".to_string())),
                Err(e) => toast.api_error("Import failed", &e),
            }
            let _ = importing.try_set(false);
        });
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-3xl font-bold">"Settings"</h2>

            <SystemStatusCard status=status />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex flex-wrap items-center gap-2">
                        <h3 class="card-title flex-1">"Logs"</h3>
                        <select class="select select-bordered select-sm" on:change=move |ev| service.set(event_target_value(&ev))>
                            {LOG_SERVICES
                                .into_iter()
                                .map(|s| view! { <option value=s>{if s.is_empty() { "all services" } else { s }}</option> })
                                .collect_view()}
                        </select>
                        <input
                            class="input input-bordered input-sm w-24"
                            type="number"
                            min="1"
                            prop:value=move || lines.get().to_string()
                            on:input=move |ev| {
                                if let Ok(n) = event_target_value(&ev).parse() {
                                    lines.set(n);
                                }
                            }
                        />
                        <button class="btn btn-sm" on:click=move |_| load_logs() disabled=move || logs_loading.get()>
                            "Reload"
                        </button>
                    </div>
                    <pre class="bg-base-200 p-4 rounded-box max-h-96 overflow-auto text-xs">
                        {move || logs.get().join("\n")}
                    </pre>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Export data"</h3>
                        <button class="btn btn-outline" on:click=on_export>"Prepare export"</button>
                        {move || export_url.get().map(|url| view! {
                            <a class="link link-primary" href=url download="tradepanel-export.json">"Download export"</a>
                        })}
                    </div>
                </div>
                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_import>
                        <h3 class="card-title">"Import data"</h3>
                        <input class="file-input file-input-bordered" type="file" accept=".json" node_ref=file_ref />
                        <button class="btn btn-primary" type="submit" disabled=move || importing.get()>
                            {move || if importing.get() { "Importing..." } else { "Import" }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
