use crate::components::fetch::{load_into, run_action};
use crate::components::toast::use_toast;
use crate::session::use_session;
use leptos::prelude::*;
use tradepanel_shared::{Broker, BrokerInput, BrokerStatus, EntityId};

const SUPPORTED_BROKERS: [&str; 4] = ["Binance", "XTB", "Interactive Brokers", "Alpaca"];

fn status_badge(status: &BrokerStatus) -> &'static str {
    match status {
        BrokerStatus::Connected => "badge badge-success",
        BrokerStatus::Disconnected => "badge badge-ghost",
        BrokerStatus::Error => "badge badge-error",
        BrokerStatus::Unknown => "badge badge-warning",
    }
}

#[component]
pub fn BrokersPage() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();

    let brokers = RwSignal::new(Vec::<Broker>::new());
    let loading = RwSignal::new(false);

    let reload = move || {
        load_into(toast, loading, brokers, "Failed to load brokers", async move {
            session.api().list_brokers().await.map(|l| l.brokers)
        })
    };
    reload();

    // 表单字段
    let broker_name = RwSignal::new(SUPPORTED_BROKERS[0].to_string());
    let api_key = RwSignal::new(String::new());
    let api_secret = RwSignal::new(String::new());
    let environment = RwSignal::new("demo".to_string());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = BrokerInput {
            broker_name: broker_name.get(),
            api_key: api_key.get(),
            api_secret: api_secret.get(),
            environment: environment.get(),
            additional_params: serde_json::json!({}),
        };
        run_action(
            toast,
            "Failed to add broker",
            async move { session.api().add_broker(&input).await },
            move |_| {
                toast.success("Broker added");
                api_key.set(String::new());
                api_secret.set(String::new());
                reload();
            },
        );
    };

    let test_connection = move |id: EntityId| {
        run_action(
            toast,
            "Connection test failed",
            async move { session.api().test_broker_connection(id).await },
            move |res| {
                let message = res.message.unwrap_or_else(|| res.status.as_str().to_string());
                if res.status.is_connected() {
                    toast.success(message);
                } else {
                    toast.error(message);
                }
                reload();
            },
        );
    };

    let delete = move |id: EntityId| {
        run_action(
            toast,
            "Failed to delete broker",
            async move { session.api().delete_broker(id).await },
            move |_| {
                toast.success("Broker deleted");
                brokers.update(|list| list.retain(|b| b.id != id));
            },
        );
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-3xl font-bold">"Brokers"</h2>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Broker"</th>
                                <th>"Environment"</th>
                                <th>"Status"</th>
                                <th>"Last used"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get() && brokers.with(Vec::is_empty)>
                                <tr>
                                    <td colspan="5" class="text-center py-8">
                                        <span class="loading loading-spinner loading-md"></span>
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || !loading.get() && brokers.with(Vec::is_empty)>
                                <tr>
                                    <td colspan="5" class="text-center py-8 opacity-50">"No brokers configured."</td>
                                </tr>
                            </Show>
                            <For
                                each=move || brokers.get()
                                key=|b| b.id
                                children=move |broker| {
                                    let id = broker.id;
                                    view! {
                                        <tr>
                                            <td class="font-bold">{broker.broker_name}</td>
                                            <td>
                                                <span class="badge badge-outline">{broker.environment}</span>
                                            </td>
                                            <td>
                                                <span class=status_badge(&broker.status)>{broker.status.as_str()}</span>
                                            </td>
                                            <td class="text-sm opacity-70">
                                                {broker
                                                    .last_used
                                                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                                                    .unwrap_or_else(|| "never".to_string())}
                                            </td>
                                            <td class="flex gap-2 justify-end">
                                                <button class="btn btn-sm btn-outline" on:click=move |_| test_connection(id)>
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

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body grid grid-cols-1 md:grid-cols-2 gap-4" on:submit=on_submit>
                    <h3 class="card-title md:col-span-2">"Add broker"</h3>
                    <select class="select select-bordered" on:change=move |ev| broker_name.set(event_target_value(&ev))>
                        {SUPPORTED_BROKERS
                            .into_iter()
                            .map(|name| view! { <option value=name>{name}</option> })
                            .collect_view()}
                    </select>
                    <select class="select select-bordered" on:change=move |ev| environment.set(event_target_value(&ev))>
                        <option value="demo">"demo"</option>
                        <option value="live">"live"</option>
                    </select>
                    <input
                        class="input input-bordered"
                        placeholder="API key"
                        required
                        prop:value=api_key
                        on:input=move |ev| api_key.set(event_target_value(&ev))
                    />
                    <input
                        class="input input-bordered"
                        type="password"
                        placeholder="API secret"
                        required
                        prop:value=api_secret
                        on:input=move |ev| api_secret.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary md:col-span-2" type="submit">"Add broker"</button>
                </form>
            </div>
        </div>
    }
}
