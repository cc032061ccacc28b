use collections_client::Route;
use shared::User;
use yew::prelude::*;

use crate::hooks::use_app;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub entries: Vec<(Route, &'static str)>,
    pub user: User,
    #[prop_or_default]
    pub children: Html,
}

/// Sidebar, header and the page body.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let app = use_app();

    let on_logout = {
        let client = app.client.clone();
        Callback::from(move |_: MouseEvent| client.logout())
    };

    html! {
        <div class="app-shell">
            <aside class="sidebar">
                <div class="sidebar-brand">{"Collections"}</div>
                <nav>
                    <ul class="sidebar-nav">
                        { for props.entries.iter().map(|(route, label)| {
                            let active = section(&app.route) == section(route);
                            html! {
                                <li class={classes!("sidebar-item", active.then_some("active"))}>
                                    <a href={route.to_path()} onclick={app.go(route.clone())}>{*label}</a>
                                </li>
                            }
                        }) }
                    </ul>
                </nav>
            </aside>
            <div class="main">
                <header class="header">
                    <div class="header-right">
                        <span class="header-user">{props.user.display_name()}</span>
                        <span class="header-role">{props.user.role.label()}</span>
                        <button class="btn btn-link" onclick={on_logout}>{"Sign out"}</button>
                    </div>
                </header>
                <main class="content">
                    { props.children.clone() }
                </main>
            </div>
        </div>
    }
}

/// First path segment, so `/loans/3` highlights "Loans".
fn section(route: &Route) -> String {
    route
        .to_path()
        .trim_start_matches('/')
        .split(['/', '?'])
        .next()
        .unwrap_or_default()
        .to_string()
}

#[derive(Properties, PartialEq)]
pub struct PageHeaderProps {
    pub title: AttrValue,
    /// Primary button, e.g. "New customer".
    #[prop_or_default]
    pub action: Option<(Route, &'static str)>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(PageHeader)]
pub fn page_header(props: &PageHeaderProps) -> Html {
    let app = use_app();
    html! {
        <div class="page-header">
            <h2>{props.title.clone()}</h2>
            <div class="page-actions">
                { props.children.clone() }
                if let Some((route, label)) = &props.action {
                    <a class="btn btn-primary" href={route.to_path()} onclick={app.go(route.clone())}>{*label}</a>
                }
            </div>
        </div>
    }
}
