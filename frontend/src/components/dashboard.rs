use crate::components::toast::use_toast;
use crate::session::use_session;
use crate::web::Interval;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tradepanel::dashboard::{ActivityEntry, DashboardModel, PerformancePoint, REFRESH_INTERVAL, load_snapshot};
use tradepanel::notification::NotificationLevel;

fn badge_class(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "badge badge-success",
        NotificationLevel::Info => "badge badge-info",
        NotificationLevel::Warning => "badge badge-warning",
        NotificationLevel::Error => "badge badge-error",
    }
}

#[component]
fn SampleBadge() -> impl IntoView {
    view! { <span class="badge badge-ghost badge-sm ml-2">"sample data"</span> }
}

#[component]
fn StatCard(title: &'static str, value: Signal<String>, accent: &'static str, #[prop(optional)] sample: bool) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-title">{title} {sample.then(|| view! { <SampleBadge /> })}</div>
            <div class=format!("stat-value {}", accent)>{value}</div>
        </div>
    }
}

/// 简易折线图 (SVG polyline)
#[component]
fn PerformanceChart(points: Vec<PerformancePoint>) -> impl IntoView {
    const WIDTH: f64 = 600.0;
    const HEIGHT: f64 = 240.0;

    let (min, max) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)));
    let span = if max > min { max - min } else { 1.0 };
    let step = if points.len() > 1 {
        WIDTH / (points.len() - 1) as f64
    } else {
        0.0
    };

    let polyline = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = i as f64 * step;
            let y = HEIGHT - (p.value - min) / span * (HEIGHT - 20.0) - 10.0;
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ");

    view! {
        <svg viewBox=format!("0 0 {} {}", WIDTH, HEIGHT) class="w-full h-64">
            <polyline points=polyline fill="none" stroke="#0d6efd" stroke-width="2" />
        </svg>
        <div class="flex justify-between text-xs opacity-60">
            {points
                .into_iter()
                .map(|p| view! { <span title=format!("${:.0}", p.value)>{p.date}</span> })
                .collect_view()}
        </div>
    }
}

#[component]
fn ActivityFeed(entries: Vec<ActivityEntry>) -> impl IntoView {
    if entries.is_empty() {
        return view! { <p class="text-center opacity-60">"No recent activity"</p> }.into_any();
    }

    view! {
        <ul class="space-y-3">
            {entries
                .into_iter()
                .map(|entry| {
                    view! {
                        <li class="flex justify-between items-center border-b border-base-200 pb-2">
                            <div>
                                <div class="font-bold">{entry.action}</div>
                                <small class="opacity-60">{entry.subject.label()}</small>
                            </div>
                            <div class="text-right">
                                <span class=badge_class(entry.level)>{entry.level.as_str()}</span>
                                <div><small class="opacity-60">{entry.time}</small></div>
                            </div>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();
    let model = RwSignal::new(DashboardModel::new());

    let refresh = move || {
        spawn_local(async move {
            let result = load_snapshot(&session.api()).await;
            // 卸载后到达的响应直接丢弃
            if let Some(Some(note)) = model.try_update(|m| m.apply(result)) {
                toast.notify(note);
            }
        });
    };

    // 挂载时加载一次，之后每 30 秒轮询；卸载时定时器随 StoredValue 一同释放
    refresh();
    let timer = StoredValue::new_local(Interval::new(REFRESH_INTERVAL, refresh));
    if timer.with_value(Option::is_none) {
        tracing::warn!("failed to start dashboard polling timer");
    }
    on_cleanup(move || timer.dispose());

    let stats = Memo::new(move |_| model.with(|m| m.stats));
    let total_return = move || {
        model.with(|m| {
            m.total_return
                .as_ref()
                .map(|r| format!("{}%", r.value))
                .unwrap_or_else(|| "0%".to_string())
        })
    };

    view! {
        <Show
            when=move || !model.with(|m| m.loading)
            fallback=|| view! {
                <div class="flex justify-center p-12">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            <div class="space-y-8">
                <h2 class="text-3xl font-bold">"Dashboard"</h2>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <StatCard title="Total return" value=Signal::derive(total_return) accent="text-success" sample=true />
                    <StatCard
                        title="Active strategies"
                        value=Signal::derive(move || stats.get().active_strategies.to_string())
                        accent="text-primary"
                    />
                    <StatCard
                        title="Connected brokers"
                        value=Signal::derive(move || stats.get().connected_brokers.to_string())
                        accent="text-info"
                    />
                    <StatCard
                        title="Backtests"
                        value=Signal::derive(move || stats.get().backtests.to_string())
                        accent="text-warning"
                    />
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                    <div class="card bg-base-100 shadow-xl lg:col-span-2">
                        <div class="card-body">
                            <h3 class="card-title">"Portfolio performance" <SampleBadge /></h3>
                            {move || {
                                model
                                    .with(|m| m.performance.clone())
                                    .map(|series| view! { <PerformanceChart points=series.value /> })
                            }}
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body max-h-96 overflow-y-auto">
                            <h3 class="card-title">"Recent activity" <SampleBadge /></h3>
                            {move || {
                                let entries = model
                                    .with(|m| m.activity.clone())
                                    .map(|a| a.value)
                                    .unwrap_or_default();
                                view! { <ActivityFeed entries=entries /> }
                            }}
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Quick actions"</h3>
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            <Link to=AppRoute::Strategies attr:class="btn btn-primary">"New strategy"</Link>
                            <Link to=AppRoute::Backtests attr:class="btn btn-success">"Run backtest"</Link>
                            <Link to=AppRoute::Brokers attr:class="btn btn-info">"Add broker"</Link>
                            <Link to=AppRoute::Models attr:class="btn btn-warning">"Upload ML model"</Link>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
