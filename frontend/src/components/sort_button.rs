use vacation_planner_lib::sort::{SortDirection, SortKey, SortOptions};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct SortButtonProps {
    pub sort_key: SortKey,
    pub current: SortOptions,
    pub on_click: Callback<SortKey>,
}

#[function_component]
pub fn SortButton(props: &SortButtonProps) -> Html {
    let sort_key = props.sort_key;
    let on_click = props.on_click.clone();
    let onclick = Callback::from(move |_| on_click.emit(sort_key));

    let active = props.current.is_active(sort_key);
    let arrow = match (active, props.current.direction) {
        (false, _) => "",
        (true, SortDirection::Asc) => " ↑",
        (true, SortDirection::Desc) => " ↓",
    };

    html! {
        <button
            class={classes!("sort-btn", active.then_some("active"))}
            aria-label={props.current.button_label(sort_key)}
            {onclick}
        >
            {format!("{}{}", sort_key.title(), arrow)}
        </button>
    }
}
