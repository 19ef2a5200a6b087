use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

#[component]
pub fn NavigationBar() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let username = move || {
        session
            .user()
            .map(|u| u.username)
            .unwrap_or_default()
    };

    let link_class = move |route: AppRoute| {
        if router.current_route().get() == route {
            "btn btn-ghost btn-sm btn-active"
        } else {
            "btn btn-ghost btn-sm"
        }
    };

    view! {
        <div class="navbar bg-neutral text-neutral-content shadow">
            <div class="flex-1 gap-2">
                <Link to=AppRoute::Dashboard attr:class="btn btn-ghost text-xl">"LEAN Trading Bot"</Link>
                <nav class="hidden md:flex gap-1">
                    {AppRoute::NAVIGATION
                        .into_iter()
                        .map(|route| view! {
                            <Link to=route attr:class=move || link_class(route)>{route.title()}</Link>
                        })
                        .collect_view()}
                </nav>
            </div>
            <div class="flex-none">
                <div class="dropdown dropdown-end">
                    <div tabindex="0" role="button" class="btn btn-ghost">{username}</div>
                    <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-100 text-base-content rounded-box w-52">
                        <li>
                            <Link to=AppRoute::Settings>"Settings"</Link>
                        </li>
                        <li>
                            <a on:click=move |_| session.logout() class="text-error">"Logout"</a>
                        </li>
                    </ul>
                </div>
            </div>
        </div>
    }
}
