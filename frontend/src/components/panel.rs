use vacation_planner_lib::{
    destination::{Coordinate, Destination, DestinationDraft},
    sort::{SortKey, SortOptions},
};
use yew::prelude::*;

use super::{destination_card::DestinationCard, destination_form::DestinationForm, sort_button::SortButton};

pub struct Panel;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub destinations: Vec<Destination>,
    pub sort_options: SortOptions,
    pub pending: Option<Coordinate>,
    pub form_error: Option<String>,
    pub on_submit: Callback<DestinationDraft>,
    pub on_cancel: Callback<()>,
    pub on_delete: Callback<String>,
    pub on_sort: Callback<SortKey>,
}

impl Component for Panel {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Panel
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();

        html! {
            <div class="panel component-container">
                <header>
                    <h1>{"Vacation Planner"}</h1>
                    <label>{"Click the map to add a destination."}</label>
                </header>
                <hr />

                if let Some(coordinate) = props.pending {
                    <DestinationForm
                        coordinate={coordinate}
                        error={props.form_error.clone()}
                        on_submit={props.on_submit.clone()}
                        on_cancel={props.on_cancel.clone()}
                    />
                }

                <div class="list-header">
                    <h2>{"My Destinations"}</h2>
                    <div class="sort-buttons">
                        <SortButton sort_key={SortKey::Date} current={props.sort_options} on_click={props.on_sort.clone()} />
                        <SortButton sort_key={SortKey::Name} current={props.sort_options} on_click={props.on_sort.clone()} />
                    </div>
                </div>

                if props.destinations.is_empty() {
                    <div class="empty-list">
                        <label>{"Your saved destinations will appear here."}</label>
                    </div>
                } else {
                    { for props.destinations.iter().map(|destination| html! {
                        <DestinationCard
                            key={destination.id.clone()}
                            destination={destination.clone()}
                            on_delete={props.on_delete.clone()}
                        />
                    }) }
                }
            </div>
        }
    }
}
