use crate::components::fetch::{load_into, run_action};
use crate::components::toast::use_toast;
use crate::session::use_session;
use crate::web::file::{read_file, selected_file};
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use tradepanel_shared::{EntityId, MlModel};

#[component]
pub fn ModelsPage() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();

    let models = RwSignal::new(Vec::<MlModel>::new());
    let loading = RwSignal::new(false);

    let reload = move || {
        load_into(toast, loading, models, "Failed to load models", async move {
            session.api().list_models().await.map(|l| l.models)
        })
    };
    reload();

    // 上传表单
    let name = RwSignal::new(String::new());
    let uploading = RwSignal::new(false);
    let file_ref = NodeRef::<Input>::new();

    let on_upload = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(file) = file_ref.get().as_ref().and_then(selected_file) else {
            toast.error("Choose a model file first");
            return;
        };
        uploading.set(true);
        spawn_local(async move {
            let result = match read_file(&file).await {
                Ok(upload) => {
                    let model_name = name.get_untracked();
                    session.api().upload_model(Some(&model_name), upload).await
                }
                Err(e) => Err(e),
            };
            match result {
                Ok(res) => {
                    toast.success(res.message.unwrap_or_else(|| "Model uploaded".to_string()));
                    let _ = name.try_set(String::new());
                    reload();
                }
                Err(e) => toast.api_error("Failed to upload model", &e),
            }
            let _ = uploading.try_set(false);
        });
    };

    // 测试面板
    let test_target = RwSignal::new(Option::<EntityId>::None);
    let test_input = RwSignal::new("[]".to_string());
    let prediction = RwSignal::new(Option::<String>::None);

    let run_test = move |_: leptos::ev::MouseEvent| {
        let Some(id) = test_target.get() else {
            return;
        };
        let input: Value = match serde_json::from_str(&test_input.get()) {
            Ok(v) => v,
            Err(e) => {
                toast.error(format!("Input must be valid JSON: {}", e));
                return;
            }
        };
        run_action(
            toast,
            "Model test failed",
            async move { session.api().test_model(id, input).await },
            move |res| prediction.set(Some(res.prediction.to_string())),
        );
    };

    let delete = move |id: EntityId| {
        run_action(
            toast,
            "Failed to delete model",
            async move { session.api().delete_model(id).await },
            move |_| {
                toast.success("Model deleted");
                models.update(|list| list.retain(|m| m.id != id));
            },
        );
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-3xl font-bold">"ML Models"</h2>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Type"</th>
                                <th class="hidden md:table-cell">"Uploaded"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get() && models.with(Vec::is_empty)>
                                <tr>
                                    <td colspan="4" class="text-center py-8">
                                        <span class="loading loading-spinner loading-md"></span>
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || models.get()
                                key=|m| m.id
                                children=move |model| {
                                    let id = model.id;
                                    view! {
                                        <tr>
                                            <td class="font-bold">{model.name}</td>
                                            <td>
                                                <span class="badge badge-outline">
                                                    {model.model_type.unwrap_or_else(|| "unknown".to_string())}
                                                </span>
                                            </td>
                                            <td class="hidden md:table-cell text-sm opacity-70">
                                                {model.created_at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())}
                                            </td>
                                            <td class="flex gap-2 justify-end">
                                                <button
                                                    class="btn btn-sm btn-outline"
                                                    on:click=move |_| {
                                                        prediction.set(None);
                                                        test_target.set(Some(id));
                                                    }
                                                >
                                                    "Test"
                                                </button>
                                                <button class="btn btn-sm btn-outline btn-error" on:click=move |_| delete(id)>
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>

            <Show when=move || test_target.get().is_some()>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body space-y-2">
                        <h3 class="card-title">
                            "Test model #" {move || test_target.get().map(|id| id.to_string())}
                        </h3>
                        <textarea
                            class="textarea textarea-bordered font-mono"
                            prop:value=test_input
                            on:input=move |ev| test_input.set(event_target_value(&ev))
                        ></textarea>
                        <div class="flex gap-2">
                            <button class="btn btn-primary" on:click=run_test>"Predict"</button>
                            <button class="btn btn-ghost" on:click=move |_| test_target.set(None)>"Close"</button>
                        </div>
                        {move || prediction.get().map(|p| view! {
                            <pre class="bg-base-200 p-4 rounded-box overflow-x-auto">{p}</pre>
                        })}
                    </div>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body grid grid-cols-1 md:grid-cols-3 gap-4" on:submit=on_upload>
                    <h3 class="card-title md:col-span-3">"Upload model"</h3>
                    <input
                        class="input input-bordered"
                        placeholder="Name (defaults to file name)"
                        prop:value=name
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <input class="file-input file-input-bordered" type="file" node_ref=file_ref />
                    <button class="btn btn-primary" type="submit" disabled=move || uploading.get()>
                        {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
