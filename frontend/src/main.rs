use crate::components::{
    map_component::MapComponent,
    notice::{Notice, Snackbar},
    panel::Panel,
};
use gloo_console::{info, warn};
use storage::BrowserStore;
use vacation_planner_lib::{
    config::MapConfig,
    destination::{Coordinate, Destination, DestinationDraft},
    persistence::DestinationRepository,
    planner::{added_notice, removed_notice, Planner},
    sort::SortKey,
    store::DestinationStore,
};
use yew::prelude::*;

mod components;
mod logging;
mod storage;

enum MainMsg {
    MapClicked(Coordinate),
    Submit(DestinationDraft),
    CancelPending,
    Delete(String),
    Sort(SortKey),
    ToggleSidebar,
    CloseNotice,
    DestinationsChanged(Vec<Destination>),
}

struct Model {
    planner: Planner,
    /// Insertion-ordered copy fed by the store's change notification.
    saved: Vec<Destination>,
    map_config: MapConfig,
    sidebar_open: bool,
    form_error: Option<String>,
    notice: Option<Notice>,
    notice_serial: u32,
}

impl Model {
    fn show_notice(&mut self, message: String) {
        self.notice_serial = self.notice_serial.wrapping_add(1);
        self.notice = Some(Notice {
            serial: self.notice_serial,
            message,
        });
    }
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut store = DestinationStore::load(DestinationRepository::new(BrowserStore::open()));
        info!(format!("Loaded {} destinations", store.len()));

        let changed = ctx.link().callback(MainMsg::DestinationsChanged);
        store.subscribe(move |destinations| changed.emit(destinations.to_vec()));
        let saved = store.destinations().to_vec();

        Self {
            planner: Planner::new(store),
            saved,
            map_config: MapConfig::default().with_access_token(option_env!("MAPTILER_KEY")),
            sidebar_open: false,
            form_error: None,
            notice: None,
            notice_serial: 0,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::MapClicked(coordinate) => {
                info!(format!("Selected {}, {}", coordinate.lng, coordinate.lat));
                self.planner.select_coordinate(coordinate);
                self.form_error = None;
                self.sidebar_open = true;
            }
            MainMsg::Submit(draft) => match self.planner.submit(draft) {
                Ok(destination) => {
                    self.form_error = None;
                    self.show_notice(added_notice(&destination));
                }
                Err(e) => {
                    warn!(format!("Rejected destination: {e}"));
                    self.form_error = Some(e.to_string());
                }
            },
            MainMsg::CancelPending => {
                self.planner.cancel_pending();
                self.form_error = None;
            }
            MainMsg::Delete(id) => {
                if let Some(removed) = self.planner.delete(&id) {
                    self.show_notice(removed_notice(&removed));
                }
            }
            MainMsg::Sort(key) => {
                self.planner.sort_by(key);
            }
            MainMsg::ToggleSidebar => {
                self.sidebar_open = !self.sidebar_open;
            }
            MainMsg::CloseNotice => {
                self.notice = None;
            }
            MainMsg::DestinationsChanged(destinations) => {
                self.saved = destinations;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let destinations = self.planner.visible();

        html! { <>
            <div class="app-bar">
                <button class="menu-btn" aria-label="open drawer" onclick={link.callback(|_| MainMsg::ToggleSidebar)}>
                    {"☰"}
                </button>
                <h1>{"Vacation Planner"}</h1>
            </div>
            if self.sidebar_open {
                <Panel
                    destinations={destinations}
                    sort_options={self.planner.sort_options()}
                    pending={self.planner.pending()}
                    form_error={self.form_error.clone()}
                    on_submit={link.callback(MainMsg::Submit)}
                    on_cancel={link.callback(|()| MainMsg::CancelPending)}
                    on_delete={link.callback(MainMsg::Delete)}
                    on_sort={link.callback(MainMsg::Sort)}
                />
            }
            <MapComponent
                config={self.map_config.clone()}
                destinations={self.saved.clone()}
                pending={self.planner.pending()}
                on_map_click={link.callback(MainMsg::MapClicked)}
            />
            if let Some(notice) = self.notice.clone() {
                <Snackbar notice={notice} on_close={link.callback(|()| MainMsg::CloseNotice)} />
            }
        </> }
    }
}

fn main() {
    logging::init();
    yew::Renderer::<Model>::new().render();
}
