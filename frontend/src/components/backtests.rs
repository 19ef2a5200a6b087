use crate::components::fetch::{load_into, run_action};
use crate::components::toast::use_toast;
use crate::session::use_session;
use leptos::prelude::*;
use tradepanel_shared::{Backtest, BacktestConfig, BacktestMetrics, EntityId, Strategy};

fn percent(v: Option<f64>) -> String {
    v.map(|v| format!("{:.2}%", v * 100.0)).unwrap_or_else(|| "-".to_string())
}

fn money(v: Option<f64>) -> String {
    v.map(|v| format!("${:.2}", v)).unwrap_or_else(|| "-".to_string())
}

#[component]
fn MetricsSummary(metrics: BacktestMetrics) -> impl IntoView {
    view! {
        <div class="stats shadow w-full bg-base-100">
            <div class="stat">
                <div class="stat-title">"Total return"</div>
                <div class="stat-value text-success">{percent(Some(metrics.total_return))}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Sharpe"</div>
                <div class="stat-value">{format!("{:.2}", metrics.sharpe_ratio)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Max drawdown"</div>
                <div class="stat-value text-error">{percent(Some(metrics.max_drawdown))}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Trades"</div>
                <div class="stat-value">{metrics.trades}</div>
                <div class="stat-desc">
                    {format!("{} won / {} lost", metrics.winning_trades, metrics.losing_trades)}
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn BacktestsPage() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();

    let backtests = RwSignal::new(Vec::<Backtest>::new());
    let strategies = RwSignal::new(Vec::<Strategy>::new());
    let loading = RwSignal::new(false);
    let strategies_loading = RwSignal::new(false);

    let reload = move || {
        load_into(toast, loading, backtests, "Failed to load backtests", async move {
            session.api().list_backtests().await.map(|l| l.backtests)
        })
    };
    reload();
    load_into(toast, strategies_loading, strategies, "Failed to load strategies", async move {
        session.api().list_strategies().await.map(|l| l.strategies)
    });

    // 回测参数
    let strategy_id = RwSignal::new(Option::<EntityId>::None);
    let start_date = RwSignal::new("2024-01-01".to_string());
    let end_date = RwSignal::new("2024-06-30".to_string());
    let capital = RwSignal::new("10000".to_string());
    let running = RwSignal::new(false);
    let last_run = RwSignal::new(Option::<BacktestMetrics>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        // 未选择时默认使用列表中的第一个策略
        let selected = strategy_id.get().or_else(|| strategies.with(|s| s.first().map(|s| s.id)));
        let Some(selected) = selected else {
            toast.error("Create a strategy first");
            return;
        };
        let Ok(initial_capital) = capital.get().trim().parse::<f64>() else {
            toast.error("Initial capital must be a number");
            return;
        };
        let config = BacktestConfig {
            strategy_id: selected,
            start_date: start_date.get(),
            end_date: end_date.get(),
            initial_capital,
        };
        running.set(true);
        run_action(
            toast,
            "Backtest failed",
            async move {
                let result = session.api().run_backtest(&config).await;
                let _ = running.try_set(false);
                result
            },
            move |run| {
                toast.success(run.message.unwrap_or_else(|| "Backtest completed".to_string()));
                last_run.set(Some(run.results));
                reload();
            },
        );
    };

    let delete = move |id: EntityId| {
        run_action(
            toast,
            "Failed to delete backtest",
            async move { session.api().delete_backtest(id).await },
            move |_| {
                toast.success("Backtest deleted");
                backtests.update(|list| list.retain(|b| b.id != id));
            },
        );
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-3xl font-bold">"Backtests"</h2>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body grid grid-cols-1 md:grid-cols-5 gap-4" on:submit=on_submit>
                    <h3 class="card-title md:col-span-5">"Run backtest"</h3>
                    <select
                        class="select select-bordered"
                        on:change=move |ev| strategy_id.set(event_target_value(&ev).parse().ok())
                    >
                        <For
                            each=move || strategies.get()
                            key=|s| s.id
                            children=|s| view! { <option value=s.id.to_string()>{s.name}</option> }
                        />
                    </select>
                    <input
                        class="input input-bordered"
                        type="date"
                        prop:value=start_date
                        on:input=move |ev| start_date.set(event_target_value(&ev))
                    />
                    <input
                        class="input input-bordered"
                        type="date"
                        prop:value=end_date
                        on:input=move |ev| end_date.set(event_target_value(&ev))
                    />
                    <input
                        class="input input-bordered"
                        type="number"
                        min="0"
                        prop:value=capital
                        on:input=move |ev| capital.set(event_target_value(&ev))
                    />
                    <button class="btn btn-success" type="submit" disabled=move || running.get()>
                        {move || if running.get() { "Running..." } else { "Run" }}
                    </button>
                </form>
            </div>

            {move || last_run.get().map(|metrics| view! { <MetricsSummary metrics=metrics /> })}

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0 overflow-x-auto">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"#"</th>
                                <th>"Strategy"</th>
                                <th>"Period"</th>
                                <th>"Capital"</th>
                                <th>"Return"</th>
                                <th>"Sharpe"</th>
                                <th>"Drawdown"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get() && backtests.with(Vec::is_empty)>
                                <tr>
                                    <td colspan="8" class="text-center py-8">
                                        <span class="loading loading-spinner loading-md"></span>
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || backtests.get()
                                key=|b| b.id
                                children=move |bt| {
                                    let id = bt.id;
                                    let period = match (bt.start_date, bt.end_date) {
                                        (Some(s), Some(e)) => format!("{} → {}", s.format("%Y-%m-%d"), e.format("%Y-%m-%d")),
                                        _ => "-".to_string(),
                                    };
                                    view! {
                                        <tr>
                                            <td>{id}</td>
                                            <td>{bt.strategy_id.map(|s| s.to_string()).unwrap_or_default()}</td>
                                            <td class="text-sm">{period}</td>
                                            <td>{money(bt.initial_capital)} " → " {money(bt.final_capital)}</td>
                                            <td>{percent(bt.total_return)}</td>
                                            <td>{bt.sharpe_ratio.map(|v| format!("{:.2}", v)).unwrap_or_default()}</td>
                                            <td>{percent(bt.max_drawdown)}</td>
                                            <td>
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
        </div>
    }
}
