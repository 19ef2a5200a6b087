use crate::components::fetch::{load_into, run_action};
use crate::components::toast::use_toast;
use crate::session::use_session;
use leptos::prelude::*;
use tradepanel_shared::{EntityId, LiveStartRequest, LiveStatus, LiveTrade};

#[component]
pub fn LiveTradingPage() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();

    let status = RwSignal::new(LiveStatus::default());
    let trades = RwSignal::new(Vec::<LiveTrade>::new());
    let status_loading = RwSignal::new(false);
    let trades_loading = RwSignal::new(false);

    let reload = move || {
        load_into(toast, status_loading, status, "Failed to load live status", async move {
            session.api().live_status().await
        });
        load_into(toast, trades_loading, trades, "Failed to load live trades", async move {
            session.api().live_trades().await.map(|l| l.trades)
        });
    };
    reload();

    let strategy_id = RwSignal::new(String::new());
    let broker_id = RwSignal::new(String::new());

    let on_start = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (Ok(strategy), Ok(broker)) = (
            strategy_id.get().trim().parse::<EntityId>(),
            broker_id.get().trim().parse::<EntityId>(),
        ) else {
            toast.error("Strategy and broker ids must be numbers");
            return;
        };
        let req = LiveStartRequest {
            strategy_id: strategy,
            broker_id: broker,
        };
        run_action(
            toast,
            "Failed to start live trading",
            async move { session.api().start_live_trading(&req).await },
            move |res| {
                toast.success(format!("Live trading started: {} on {}", res.strategy_name, res.broker_name));
                reload();
            },
        );
    };

    let stop = move |id: EntityId| {
        run_action(
            toast,
            "Failed to stop live trading",
            async move { session.api().stop_live_trading(id).await },
            move |_| {
                toast.success("Live trading stopped");
                reload();
            },
        );
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-3xl font-bold">"Live Trading"</h2>
                <button class="btn btn-ghost" on:click=move |_| reload() disabled=move || status_loading.get()>
                    "Refresh"
                </button>
            </div>

            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Engine"</div>
                    <div class=move || if status.with(|s| s.running) { "stat-value text-success" } else { "stat-value opacity-50" }>
                        {move || if status.with(|s| s.running) { "running" } else { "stopped" }}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Sessions"</div>
                    <div class="stat-value">{move || status.with(|s| s.sessions.len())}</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <table class="table w-full">
                        <thead>
                            <tr>
                                <th>"#"</th>
                                <th>"Strategy"</th>
                                <th>"Broker"</th>
                                <th>"Started"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || status.with(|s| s.sessions.clone())
                                key=|s| s.id
                                children=move |live| {
                                    let id = live.id;
                                    view! {
                                        <tr>
                                            <td>{id}</td>
                                            <td>{live.strategy_name.unwrap_or_default()}</td>
                                            <td>{live.broker_name.unwrap_or_default()}</td>
                                            <td class="text-sm opacity-70">
                                                {live.started_at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())}
                                            </td>
                                            <td>
                                                <button class="btn btn-sm btn-error" on:click=move |_| stop(id)>"Stop"</button>
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
                <form class="card-body grid grid-cols-1 md:grid-cols-3 gap-4" on:submit=on_start>
                    <h3 class="card-title md:col-span-3">"Start live trading"</h3>
                    <input
                        class="input input-bordered"
                        type="number"
                        placeholder="Strategy id"
                        required
                        prop:value=strategy_id
                        on:input=move |ev| strategy_id.set(event_target_value(&ev))
                    />
                    <input
                        class="input input-bordered"
                        type="number"
                        placeholder="Broker id"
                        required
                        prop:value=broker_id
                        on:input=move |ev| broker_id.set(event_target_value(&ev))
                    />
                    <button class="btn btn-success" type="submit">"Start"</button>
                </form>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <h3 class="card-title p-6 pb-0">"Recent trades"</h3>
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Time"</th>
                                <th>"Symbol"</th>
                                <th>"Side"</th>
                                <th>"Quantity"</th>
                                <th>"Price"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || !trades_loading.get() && trades.with(Vec::is_empty)>
                                <tr>
                                    <td colspan="5" class="text-center py-8 opacity-50">"No trades yet."</td>
                                </tr>
                            </Show>
                            {move || {
                                trades
                                    .get()
                                    .into_iter()
                                    .map(|t| {
                                        let side_class = if t.side.eq_ignore_ascii_case("buy") { "text-success" } else { "text-error" };
                                        view! {
                                            <tr>
                                                <td class="text-sm">{t.timestamp.map(|ts| ts.format("%H:%M:%S").to_string())}</td>
                                                <td class="font-mono">{t.symbol}</td>
                                                <td class=side_class>{t.side}</td>
                                                <td>{t.quantity}</td>
                                                <td>{format!("{:.4}", t.price)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
