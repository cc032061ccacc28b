use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BadgeProps {
    pub class: AttrValue,
    pub label: AttrValue,
}

#[function_component(Badge)]
pub fn badge(props: &BadgeProps) -> Html {
    html! { <span class={props.class.to_string()}>{props.label.clone()}</span> }
}

/// Yes/no flags such as "active".
#[function_component(ActiveBadge)]
pub fn active_badge(props: &ActiveBadgeProps) -> Html {
    if props.active {
        html! { <Badge class="badge badge-success" label="Active" /> }
    } else {
        html! { <Badge class="badge badge-secondary" label="Inactive" /> }
    }
}

#[derive(Properties, PartialEq)]
pub struct ActiveBadgeProps {
    pub active: bool,
}
