use crate::destination::{Coordinate, Destination};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Saved,
    /// Uncommitted candidate, drawn differently from saved destinations.
    Pending,
}

pub trait MarkerHandle {
    fn remove(&self);
}

/// The parts of a map widget the synchronizer needs.
pub trait MapSurface {
    type Marker: MarkerHandle;

    fn add_marker(&self, coordinate: Coordinate, style: MarkerStyle, popup_html: Option<&str>) -> Self::Marker;
}

/// Keeps the markers on a map in line with the destination list and the
/// pending coordinate. Saved markers are rebuilt from scratch on every list
/// change. Nothing touches the map before `mark_ready`.
pub struct MarkerSynchronizer<M: MapSurface> {
    map: M,
    ready: bool,
    saved: Vec<M::Marker>,
    pending: Option<M::Marker>,
    desired_saved: Vec<Destination>,
    desired_pending: Option<Coordinate>,
}

impl<M: MapSurface> MarkerSynchronizer<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            ready: false,
            saved: Vec::new(),
            pending: None,
            desired_saved: Vec::new(),
            desired_pending: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Called once the map surface has loaded. Applies anything recorded so far.
    pub fn mark_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        tracing::debug!("Map ready, placing {} saved markers", self.desired_saved.len());
        self.rebuild_saved();
        self.rebuild_pending();
    }

    pub fn sync_destinations(&mut self, destinations: &[Destination]) {
        self.desired_saved = destinations.to_vec();
        if self.ready {
            self.rebuild_saved();
        }
    }

    pub fn sync_pending(&mut self, pending: Option<Coordinate>) {
        self.desired_pending = pending;
        if self.ready {
            self.rebuild_pending();
        }
    }

    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Removes every marker. The map itself is left to its owner.
    pub fn teardown(&mut self) {
        for marker in self.saved.drain(..) {
            marker.remove();
        }
        if let Some(marker) = self.pending.take() {
            marker.remove();
        }
        self.ready = false;
    }

    fn rebuild_saved(&mut self) {
        for marker in self.saved.drain(..) {
            marker.remove();
        }

        for destination in &self.desired_saved {
            let popup = popup_html(destination);
            let marker = self.map.add_marker(destination.coordinate(), MarkerStyle::Saved, Some(&popup));
            self.saved.push(marker);
        }
    }

    fn rebuild_pending(&mut self) {
        if let Some(marker) = self.pending.take() {
            marker.remove();
        }
        if let Some(coordinate) = self.desired_pending {
            self.pending = Some(self.map.add_marker(coordinate, MarkerStyle::Pending, None));
        }
    }
}

pub fn popup_html(destination: &Destination) -> String {
    format!("<h3>{}</h3><p>{}</p>", escape_html(&destination.name), escape_html(&destination.date))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
