use gloo_console::{error, info};
use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, MarkerOptions, MouseEvent, Popup, PopupOptions, TileLayer, TileLayerOptions};
use vacation_planner_lib::{
    click_bridge::{ClickTarget, MapClick, MapClickBridge},
    config::MapConfig,
    destination::{Coordinate, Destination},
    markers::{MapSurface, MarkerHandle, MarkerStyle, MarkerSynchronizer},
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node};
use yew::prelude::*;

/// Leaflet classes of marker icons and their popups.
const MARKER_SELECTOR: &str = ".leaflet-marker-icon, .leaflet-popup";

pub enum Msg {
    Ready,
}

pub struct MapComponent {
    map: Map,
    container: HtmlElement,
    markers: MarkerSynchronizer<LeafletSurface>,
    tiles_available: bool,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub config: MapConfig,
    pub destinations: Vec<Destination>,
    pub pending: Option<Coordinate>,
    pub on_map_click: Callback<Coordinate>,
}

impl MapComponent {
    fn render_map(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }
}

impl Component for MapComponent {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let container: Element = document().create_element("div").expect("failed to create map container");
        let container: HtmlElement = container.unchecked_into();
        container.set_class_name("map");

        let leaflet_map = Map::new_with_element(&container, &MapOptions::default());

        let tiles_available = ctx.props().config.tile_url().is_some();
        if !tiles_available {
            error!("Map tile key is not set. Build with MAPTILER_KEY=<key> to load map tiles.");
        }

        let mut markers = MarkerSynchronizer::new(LeafletSurface { map: leaflet_map.clone() });
        markers.sync_destinations(&ctx.props().destinations);
        markers.sync_pending(ctx.props().pending);

        Self {
            map: leaflet_map,
            container,
            markers,
            tiles_available,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let config = &ctx.props().config;

        let ready = ctx.link().callback(|()| Msg::Ready);
        self.map.on_load(Box::new(move |_| ready.emit(())));

        let on_map_click = ctx.props().on_map_click.clone();
        let bridge = MapClickBridge::new(move |coordinate| on_map_click.emit(coordinate));
        self.map.on_mouse_click(Box::new(move |event: MouseEvent| {
            let lat_lng = event.lat_lng();
            let target = ClickedElement(event.original_event().target().and_then(|t| t.dyn_into::<Element>().ok()));
            bridge.handle_click(&MapClick {
                lng: lat_lng.lng(),
                lat: lat_lng.lat(),
                target,
            });
        }));

        self.map.set_max_zoom(config.max_zoom);
        if let Some(url) = config.tile_url() {
            add_tile_layer(&self.map, &url);
        }
        // Fires the load event
        self.map.set_view(&LatLng::new(config.center.lat, config.center.lng), config.zoom);
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Ready => {
                info!("Map ready");
                self.markers.mark_ready();
                true
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        self.map.invalidate_size(false);
        let props = ctx.props();

        if props.destinations != old_props.destinations {
            self.markers.sync_destinations(&props.destinations);
        }
        if props.pending != old_props.pending {
            self.markers.sync_pending(props.pending);
        }

        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="map-area">
                if !self.markers.is_ready() {
                    <div class="map-loading">{"Loading map…"}</div>
                }
                if !self.tiles_available {
                    <div class="map-unavailable">{"Map tiles unavailable: no access key configured"}</div>
                }
                {self.render_map()}
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.markers.teardown();
        self.map.remove();
    }
}

struct ClickedElement(Option<Element>);

impl ClickTarget for ClickedElement {
    fn is_within_marker(&self) -> bool {
        self.0
            .as_ref()
            .and_then(|element| element.closest(MARKER_SELECTOR).ok().flatten())
            .is_some()
    }
}

struct LeafletSurface {
    map: Map,
}

struct LeafletMarker(Marker);

impl MarkerHandle for LeafletMarker {
    fn remove(&self) {
        self.0.remove();
    }
}

impl MapSurface for LeafletSurface {
    type Marker = LeafletMarker;

    fn add_marker(&self, coordinate: Coordinate, style: MarkerStyle, popup_html: Option<&str>) -> LeafletMarker {
        let opts = MarkerOptions::new();
        if style == MarkerStyle::Pending {
            opts.set_opacity(0.55);
        }

        let marker = Marker::new_with_options(&LatLng::new(coordinate.lat, coordinate.lng), &opts);
        if let Some(html) = popup_html {
            let popup_opts = PopupOptions::default();
            let popup = Popup::new(&popup_opts, None);
            popup.set_content(&html.into());
            marker.bind_popup(&popup);
        }
        marker.add_to(&self.map);

        LeafletMarker(marker)
    }
}

fn add_tile_layer(map: &Map, url: &str) {
    let opts = TileLayerOptions::new();
    opts.set_update_when_idle(true);
    TileLayer::new_options(url, &opts).add_to(map);
}
