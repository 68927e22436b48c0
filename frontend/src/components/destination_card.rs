use vacation_planner_lib::{date_format::format_date, destination::Destination};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct DestinationCardProps {
    pub destination: Destination,
    pub on_delete: Callback<String>,
}

#[function_component]
pub fn DestinationCard(props: &DestinationCardProps) -> Html {
    let destination = &props.destination;

    let on_delete = props.on_delete.clone();
    let id = destination.id.clone();
    let onclick = Callback::from(move |_| on_delete.emit(id.clone()));

    html! {
        <div class="destination-card">
            <div class="destination-info">
                <h3>{&destination.name}</h3>
                <label>{format_date(&destination.date)}</label>
                <label class="coordinates">{format!("Lat: {}, Lng: {}", destination.lat, destination.lng)}</label>
            </div>
            <button class="delete-btn" aria-label={format!("Delete {}", destination.name)} {onclick}>
                {"✕"}
            </button>
        </div>
    }
}
