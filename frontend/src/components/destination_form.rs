use vacation_planner_lib::destination::{Coordinate, DestinationDraft};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct DestinationFormProps {
    pub coordinate: Coordinate,
    pub error: Option<String>,
    pub on_submit: Callback<DestinationDraft>,
    pub on_cancel: Callback<()>,
}

#[function_component]
pub fn DestinationForm(props: &DestinationFormProps) -> Html {
    let name = use_state(String::new);
    let date = use_state(String::new);
    let local_error = use_state(|| None::<String>);
    let name_input = use_node_ref();

    {
        let name_input = name_input.clone();
        use_effect_with((), move |_| {
            if let Some(input) = name_input.cast::<web_sys::HtmlInputElement>() {
                let _ = input.focus();
            }
        });
    }

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_date_input = {
        let date = date.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            date.set(input.value());
        })
    };

    let onsubmit = {
        let name = name.clone();
        let date = date.clone();
        let local_error = local_error.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let draft = DestinationDraft::new((*name).clone(), (*date).clone());
            match draft.validate() {
                Ok(()) => {
                    local_error.set(None);
                    on_submit.emit(draft);
                }
                Err(e) => local_error.set(Some(e.to_string())),
            }
        })
    };

    let on_cancel = props.on_cancel.clone();
    let oncancel = Callback::from(move |_| on_cancel.emit(()));

    let error = (*local_error).clone().or_else(|| props.error.clone());

    html! {
        <form class="destination-form" {onsubmit}>
            <h2>{"Add New Destination"}</h2>
            <input
                ref={name_input}
                type="text"
                placeholder="Destination Name"
                value={(*name).clone()}
                oninput={on_name_input}
                required=true
            />
            <input
                type="date"
                value={(*date).clone()}
                oninput={on_date_input}
                required=true
            />
            <label class="coordinates">
                {format!("Lat: {}, Lng: {}", props.coordinate.lat, props.coordinate.lng)}
            </label>
            if let Some(error) = error {
                <label class="form-error">{error}</label>
            }
            <div class="form-buttons">
                <button type="button" onclick={oncancel}>{"Cancel"}</button>
                <button type="submit" class="primary">{"Add Destination"}</button>
            </div>
        </form>
    }
}
