use crate::{
    destination::{Coordinate, Destination, DestinationDraft},
    sort::{SortKey, SortOptions},
    store::DestinationStore,
    PlannerError,
};

/// One planning session: the store plus the pending map selection and the
/// chosen sort order.
pub struct Planner {
    store: DestinationStore,
    pending: Option<Coordinate>,
    sort_options: SortOptions,
}

impl Planner {
    pub fn new(store: DestinationStore) -> Self {
        Self {
            store,
            pending: None,
            sort_options: SortOptions::default(),
        }
    }

    pub fn store(&self) -> &DestinationStore {
        &self.store
    }

    pub fn pending(&self) -> Option<Coordinate> {
        self.pending
    }

    /// Replaces any earlier selection.
    pub fn select_coordinate(&mut self, coordinate: Coordinate) {
        self.pending = Some(coordinate);
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Adds the draft at the pending coordinate. On any error nothing is
    /// stored and the selection is kept so the form can be corrected.
    pub fn submit(&mut self, draft: DestinationDraft) -> Result<Destination, PlannerError> {
        let coordinate = self.pending.ok_or(PlannerError::NoPendingCoordinate)?;
        let candidate = draft.into_new_destination(coordinate)?;
        let destination = self.store.add(candidate)?;
        self.pending = None;
        Ok(destination)
    }

    pub fn delete(&mut self, id: &str) -> Option<Destination> {
        self.store.delete(id)
    }

    pub fn sort_by(&mut self, key: SortKey) -> SortOptions {
        self.sort_options = self.sort_options.toggle(key);
        tracing::debug!("Sorting by {}", self.sort_options);
        self.sort_options
    }

    pub fn sort_options(&self) -> SortOptions {
        self.sort_options
    }

    pub fn visible(&self) -> Vec<Destination> {
        self.store.list(self.sort_options)
    }
}

pub fn added_notice(destination: &Destination) -> String {
    format!("Added \"{}\" to destinations!", destination.name)
}

pub fn removed_notice(destination: &Destination) -> String {
    format!("Removed \"{}\" from destinations.", destination.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sort::SortDirection, store::UuidGenerator};

    fn planner() -> Planner {
        Planner::new(DestinationStore::new(Vec::new(), UuidGenerator))
    }

    #[test]
    fn submit_needs_a_selection() {
        let mut planner = planner();
        assert_eq!(
            planner.submit(DestinationDraft::new("Paris", "2025-08-12")),
            Err(PlannerError::NoPendingCoordinate)
        );
    }

    #[test]
    fn invalid_draft_keeps_selection() {
        let mut planner = planner();
        planner.select_coordinate(Coordinate::new(2.3508, 48.8567));

        assert_eq!(planner.submit(DestinationDraft::new("", "2025-08-12")), Err(PlannerError::EmptyName));
        assert_eq!(planner.pending(), Some(Coordinate::new(2.3508, 48.8567)));
        assert!(planner.store().is_empty());
    }

    #[test]
    fn submit_adds_and_clears_selection() {
        let mut planner = planner();
        planner.select_coordinate(Coordinate::new(1., 1.));
        planner.select_coordinate(Coordinate::new(2.3508, 48.8567));

        let paris = planner.submit(DestinationDraft::new("Paris", "2025-08-12")).unwrap();
        assert_eq!((paris.lng, paris.lat), (2.3508, 48.8567));
        assert_eq!(planner.pending(), None);
        assert_eq!(added_notice(&paris), "Added \"Paris\" to destinations!");

        let removed = planner.delete(&paris.id).unwrap();
        assert_eq!(removed_notice(&removed), "Removed \"Paris\" from destinations.");
        assert!(planner.delete(&paris.id).is_none());
    }

    #[test]
    fn sorting_is_applied_to_visible_list() {
        let mut planner = planner();
        for (name, date) in [("Rome", "2025-05-01"), ("Paris", "2025-08-12")] {
            planner.select_coordinate(Coordinate::new(0., 0.));
            planner.submit(DestinationDraft::new(name, date)).unwrap();
        }

        assert_eq!(planner.sort_by(SortKey::Name), SortOptions::new(SortKey::Name, SortDirection::Asc));
        let names: Vec<String> = planner.visible().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["Paris", "Rome"]);
        // Insertion order is untouched
        assert_eq!(planner.store().destinations()[0].name, "Rome");
    }
}
