use uuid::Uuid;

use crate::{
    destination::{Destination, NewDestination},
    persistence::{DestinationRepository, KeyValueStore},
    sort::{sorted, SortOptions},
    PlannerError,
};

const MAX_ID_ATTEMPTS: usize = 8;

pub trait IdGenerator {
    fn generate(&mut self) -> Result<String, PlannerError>;
}

/// Random v4 UUIDs.
#[derive(Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&mut self) -> Result<String, PlannerError> {
        Ok(Uuid::new_v4().to_string())
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> Result<String, PlannerError>,
{
    fn generate(&mut self) -> Result<String, PlannerError> {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Listener = Box<dyn FnMut(&[Destination])>;

/// Authoritative, insertion-ordered destination collection.
///
/// Every mutation notifies all subscribers synchronously with the full
/// collection before returning. Subscriber order is unspecified.
pub struct DestinationStore {
    destinations: Vec<Destination>,
    id_generator: Box<dyn IdGenerator>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: usize,
}

impl DestinationStore {
    pub fn new(destinations: Vec<Destination>, id_generator: impl IdGenerator + 'static) -> Self {
        Self {
            destinations,
            id_generator: Box::new(id_generator),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Loads the persisted collection and keeps it in sync with every mutation.
    /// Write failures are logged and leave the in-memory state untouched.
    pub fn load<S: KeyValueStore + 'static>(repository: DestinationRepository<S>) -> Self {
        Self::load_with_ids(repository, UuidGenerator)
    }

    pub fn load_with_ids<S: KeyValueStore + 'static>(
        repository: DestinationRepository<S>,
        id_generator: impl IdGenerator + 'static,
    ) -> Self {
        let mut store = Self::new(repository.load_or_default(), id_generator);
        store.subscribe(move |destinations| {
            if let Err(e) = repository.save(destinations) {
                tracing::error!("Failed to persist {} destinations: {e}", destinations.len());
            }
        });
        store
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&[Destination]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    pub fn add(&mut self, candidate: NewDestination) -> Result<Destination, PlannerError> {
        let id = self.fresh_id()?;
        let destination = candidate.with_id(id);
        tracing::info!("Adding destination {} ({})", destination.name, destination.id);

        self.destinations.push(destination.clone());
        self.notify();

        Ok(destination)
    }

    /// Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> Option<Destination> {
        let removed = self
            .destinations
            .iter()
            .position(|d| d.id == id)
            .map(|index| self.destinations.remove(index));

        match &removed {
            Some(destination) => tracing::info!("Deleted destination {} ({})", destination.name, id),
            None => tracing::debug!("Delete of unknown destination {id} ignored"),
        }

        self.notify();
        removed
    }

    pub fn list(&self, options: SortOptions) -> Vec<Destination> {
        sorted(&self.destinations, options)
    }

    /// Insertion order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    fn fresh_id(&mut self) -> Result<String, PlannerError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.id_generator.generate()?;
            if self.get(&id).is_none() {
                return Ok(id);
            }
            tracing::warn!("Generated id {id} is already in use, retrying");
        }
        Err(PlannerError::IdGeneration(format!("no unused id after {MAX_ID_ATTEMPTS} attempts")))
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.destinations);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        persistence::MemoryStore,
        sort::{SortDirection, SortKey},
    };

    fn candidate(name: &str, date: &str, lng: f64, lat: f64) -> NewDestination {
        NewDestination {
            name: name.into(),
            date: date.into(),
            lng,
            lat,
        }
    }

    fn names(list: &[Destination]) -> Vec<&str> {
        list.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn paris_rome_scenario() {
        let mut store = DestinationStore::load(DestinationRepository::new(MemoryStore::new()));
        let paris = store.add(candidate("Paris", "2025-08-12", 2.35, 48.86)).unwrap();
        store.add(candidate("Rome", "2025-05-01", 12.49, 41.89)).unwrap();

        let mut options = SortOptions::default();
        assert_eq!(names(&store.list(options)), ["Paris", "Rome"]);

        options = options.toggle(SortKey::Date);
        assert_eq!(options.direction, SortDirection::Desc);
        assert_eq!(names(&store.list(options)), ["Paris", "Rome"]);

        options = options.toggle(SortKey::Date);
        assert_eq!(names(&store.list(options)), ["Rome", "Paris"]);

        store.delete(&paris.id);
        assert_eq!(names(&store.list(options)), ["Rome"]);
    }

    #[test]
    fn default_listing_keeps_surviving_insertion_order() {
        let mut store = DestinationStore::new(Vec::new(), UuidGenerator);
        let ids: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|name| store.add(candidate(name, "2025-01-01", 0., 0.)).unwrap().id)
            .collect();

        store.delete(&ids[1]);
        store.delete(&ids[3]);
        store.add(candidate("f", "2025-01-01", 0., 0.)).unwrap();

        // Sorting never reorders the stored collection
        store.list(SortOptions::new(SortKey::Name, SortDirection::Desc));
        assert_eq!(names(&store.list(SortOptions::default())), ["a", "c", "e", "f"]);
    }

    #[test]
    fn delete_unknown_id_is_a_noop() {
        let mut store = DestinationStore::new(Vec::new(), UuidGenerator);
        store.add(candidate("Oslo", "2025-01-01", 10.75, 59.91)).unwrap();
        assert!(store.delete("missing").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn colliding_ids_are_regenerated() {
        let ids = Rc::new(RefCell::new(vec!["1", "1", "1", "2"].into_iter()));
        let generator = move || Ok::<_, PlannerError>(ids.borrow_mut().next().unwrap_or("x").to_string());
        let mut store = DestinationStore::new(Vec::new(), generator);

        let first = store.add(candidate("a", "2025-01-01", 0., 0.)).unwrap();
        let second = store.add(candidate("b", "2025-01-01", 0., 0.)).unwrap();
        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
    }

    #[test]
    fn exhausted_id_generator_fails_without_mutation() {
        let mut store = DestinationStore::new(Vec::new(), || Ok::<_, PlannerError>("same".to_string()));
        store.add(candidate("a", "2025-01-01", 0., 0.)).unwrap();
        assert!(matches!(store.add(candidate("b", "2025-01-01", 0., 0.)), Err(PlannerError::IdGeneration(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn mutations_are_persisted_immediately() {
        let backing = MemoryStore::new();
        let mut store = DestinationStore::load(DestinationRepository::new(backing.clone()));
        let added = store.add(candidate("Kyoto", "2026-04-01", 135.7681, 35.0116)).unwrap();

        let reloaded = DestinationRepository::new(backing.clone()).load().unwrap();
        assert_eq!(reloaded, vec![added.clone()]);

        store.delete(&added.id);
        assert!(DestinationRepository::new(backing).load().unwrap().is_empty());
    }

    #[test]
    fn write_failures_keep_in_memory_state() {
        let backing = MemoryStore::new();
        let mut store = DestinationStore::load(DestinationRepository::new(backing.clone()));
        backing.set_read_only(true);

        store.add(candidate("Lima", "2025-02-02", -77.0428, -12.0464)).unwrap();
        assert_eq!(store.len(), 1);
        assert!(DestinationRepository::new(backing).load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_storage_starts_empty() {
        let backing = MemoryStore::new();
        backing.set(crate::STORAGE_KEY, "[{\"id\":").unwrap();
        let store = DestinationStore::load(DestinationRepository::new(backing));
        assert!(store.is_empty());
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = DestinationStore::new(Vec::new(), UuidGenerator);
        let sink = seen.clone();
        let subscription = store.subscribe(move |list| sink.borrow_mut().push(list.len()));

        let added = store.add(candidate("a", "2025-01-01", 0., 0.)).unwrap();
        store.delete(&added.id);
        store.unsubscribe(subscription);
        store.add(candidate("b", "2025-01-01", 0., 0.)).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 0]);
    }
}
