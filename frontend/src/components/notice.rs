use gloo_timers::callback::Timeout;
use yew::prelude::*;

const AUTO_HIDE_MS: u32 = 4000;

#[derive(PartialEq, Clone, Debug)]
pub struct Notice {
    /// Distinguishes repeated identical messages so each restarts the timer.
    pub serial: u32,
    pub message: String,
}

#[derive(PartialEq, Properties, Clone)]
pub struct NoticeProps {
    pub notice: Notice,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn Snackbar(props: &NoticeProps) -> Html {
    {
        let on_close = props.on_close.clone();
        use_effect_with(props.notice.serial, move |_| {
            let timeout = Timeout::new(AUTO_HIDE_MS, move || on_close.emit(()));
            move || drop(timeout)
        });
    }

    let on_close = props.on_close.clone();
    let onclick = Callback::from(move |_| on_close.emit(()));

    html! {
        <div class="snackbar" role="status">
            <span>{&props.notice.message}</span>
            <button class="snackbar-close" aria-label="close" {onclick}>{"✕"}</button>
        </div>
    }
}
