use crate::components::fetch::{load_into, run_action};
use crate::components::toast::use_toast;
use crate::session::use_session;
use leptos::prelude::*;
use tradepanel_shared::{EntityId, Strategy, StrategyInput};

const CODE_TEMPLATE: &str = "class MyAlgorithm(QCAlgorithm):\n    def Initialize(self):\n        pass\n";

#[component]
pub fn StrategiesPage() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();

    let strategies = RwSignal::new(Vec::<Strategy>::new());
    let loading = RwSignal::new(false);

    let reload = move || {
        load_into(toast, loading, strategies, "Failed to load strategies", async move {
            session.api().list_strategies().await.map(|l| l.strategies)
        })
    };
    reload();

    let name = RwSignal::new(String::new());
    let code = RwSignal::new(CODE_TEMPLATE.to_string());
    let parameters = RwSignal::new("{}".to_string());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let params = match serde_json::from_str(&parameters.get()) {
            Ok(v) => v,
            Err(e) => {
                toast.error(format!("Parameters must be valid JSON: {}", e));
                return;
            }
        };
        let input = StrategyInput {
            name: name.get(),
            code: code.get(),
            parameters: params,
        };
        run_action(
            toast,
            "Failed to create strategy",
            async move { session.api().create_strategy(&input).await },
            move |_| {
                toast.success("Strategy created");
                name.set(String::new());
                reload();
            },
        );
    };

    let toggle = move |id: EntityId| {
        run_action(
            toast,
            "Failed to toggle strategy",
            async move { session.api().toggle_strategy(id).await },
            move |res| {
                if let Some(message) = res.message {
                    toast.success(message);
                }
                match res.is_active {
                    Some(active) => strategies.update(|list| {
                        if let Some(s) = list.iter_mut().find(|s| s.id == id) {
                            s.is_active = active;
                        }
                    }),
                    None => reload(),
                }
            },
        );
    };

    let delete = move |id: EntityId| {
        run_action(
            toast,
            "Failed to delete strategy",
            async move { session.api().delete_strategy(id).await },
            move |_| {
                toast.success("Strategy deleted");
                strategies.update(|list| list.retain(|s| s.id != id));
            },
        );
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-3xl font-bold">"Strategies"</h2>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Status"</th>
                                <th class="hidden md:table-cell">"Updated"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get() && strategies.with(Vec::is_empty)>
                                <tr>
                                    <td colspan="4" class="text-center py-8">
                                        <span class="loading loading-spinner loading-md"></span>
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || strategies.get()
                                key=|s| (s.id, s.is_active)
                                children=move |strategy| {
                                    let id = strategy.id;
                                    let (badge, label) = if strategy.is_active {
                                        ("badge badge-success", "active")
                                    } else {
                                        ("badge badge-ghost", "inactive")
                                    };
                                    view! {
                                        <tr>
                                            <td class="font-bold">{strategy.name}</td>
                                            <td><span class=badge>{label}</span></td>
                                            <td class="hidden md:table-cell text-sm opacity-70">
                                                {strategy
                                                    .updated_at
                                                    .or(strategy.created_at)
                                                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())}
                                            </td>
                                            <td class="flex gap-2 justify-end">
                                                <button class="btn btn-sm btn-outline" on:click=move |_| toggle(id)>
                                                    {if strategy.is_active { "Stop" } else { "Start" }}
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

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h3 class="card-title">"New strategy"</h3>
                    <input
                        class="input input-bordered w-full"
                        placeholder="Strategy name"
                        required
                        prop:value=name
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <textarea
                        class="textarea textarea-bordered w-full font-mono h-48"
                        prop:value=code
                        on:input=move |ev| code.set(event_target_value(&ev))
                    ></textarea>
                    <input
                        class="input input-bordered w-full font-mono"
                        placeholder="Parameters (JSON)"
                        prop:value=parameters
                        on:input=move |ev| parameters.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary" type="submit">"Create"</button>
                </form>
            </div>
        </div>
    }
}
