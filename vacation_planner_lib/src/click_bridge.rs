use crate::destination::Coordinate;

/// Whatever element a click landed on.
pub trait ClickTarget {
    /// True if the element is a marker, part of one, or part of its popup.
    fn is_within_marker(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct MapClick<T: ClickTarget> {
    pub lng: f64,
    pub lat: f64,
    pub target: T,
}

/// Turns raw map clicks into candidate coordinates for a new destination.
pub struct MapClickBridge {
    on_candidate: Box<dyn Fn(Coordinate)>,
}

impl MapClickBridge {
    pub fn new(on_candidate: impl Fn(Coordinate) + 'static) -> Self {
        Self {
            on_candidate: Box::new(on_candidate),
        }
    }

    /// Returns the emitted coordinate, if any.
    pub fn handle_click<T: ClickTarget>(&self, click: &MapClick<T>) -> Option<Coordinate> {
        let coordinate = candidate_from_click(click)?;
        (self.on_candidate)(coordinate);
        Some(coordinate)
    }
}

pub fn candidate_from_click<T: ClickTarget>(click: &MapClick<T>) -> Option<Coordinate> {
    if click.target.is_within_marker() {
        tracing::trace!("Ignoring click on marker");
        return None;
    }
    Some(Coordinate::captured(click.lng, click.lat))
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    impl ClickTarget for bool {
        fn is_within_marker(&self) -> bool {
            *self
        }
    }

    fn recording_bridge() -> (MapClickBridge, Rc<RefCell<Vec<Coordinate>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (MapClickBridge::new(move |c| sink.borrow_mut().push(c)), seen)
    }

    #[test]
    fn click_on_map_emits_rounded_candidate() {
        let (bridge, seen) = recording_bridge();
        bridge.handle_click(&MapClick { lng: 2.3508, lat: 48.8567, target: false });
        bridge.handle_click(&MapClick { lng: -0.127758, lat: 51.507351, target: false });

        assert_eq!(*seen.borrow(), vec![Coordinate::new(2.3508, 48.8567), Coordinate::new(-0.1278, 51.5074)]);
    }

    #[test]
    fn click_on_marker_is_discarded() {
        let (bridge, seen) = recording_bridge();
        assert_eq!(bridge.handle_click(&MapClick { lng: 2.35, lat: 48.86, target: true }), None);
        assert!(seen.borrow().is_empty());
    }
}
