use crate::model::{CoffeeEntry, EntryId, Session};
use crate::persist::{PersistError, SessionSink};
use async_channel::{Receiver, Sender};

/// What changed in the last store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    CoffeeAdded(EntryId),
    CoffeeUpdated(EntryId),
    CoffeeDeleted(EntryId),
    DetailsUpdated,
    Replaced,
}

/// Owns the current [`Session`]. Each mutation is a single read-modify-write
/// followed by a notification to every subscriber. Writing to disk is a
/// separate [`SessionStore::commit`] step.
pub struct SessionStore {
    session: Session,
    subscribers: Vec<Sender<SessionChange>>,
    dirty: bool,
}

impl SessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            subscribers: Vec::new(),
            dirty: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn subscribe(&mut self) -> Receiver<SessionChange> {
        let (tx, rx) = async_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, change: SessionChange) {
        self.dirty = true;
        self.subscribers
            .retain(|tx| tx.try_send(change.clone()).is_ok());
    }

    /// Appends a new coffee and returns its id.
    pub fn add_coffee(&mut self) -> EntryId {
        let id = self.session.add_coffee();
        self.notify(SessionChange::CoffeeAdded(id.clone()));
        id
    }

    /// Runs `edit` against one entry. Returns `None` if the id is unknown,
    /// otherwise what `edit` returned. Lock rules are enforced by the entry
    /// itself, so an edit on a locked entry comes back as `Some(false)` from
    /// the gated setters.
    pub fn edit_coffee<R>(
        &mut self,
        id: &EntryId,
        edit: impl FnOnce(&mut CoffeeEntry) -> R,
    ) -> Option<R> {
        let entry = self.session.coffee_mut(id)?;
        let before = entry.clone();
        let result = edit(entry);
        if *entry != before {
            self.notify(SessionChange::CoffeeUpdated(id.clone()));
        }
        Some(result)
    }

    pub fn delete_coffee(&mut self, id: &EntryId) -> bool {
        let deleted = self.session.delete_coffee(id);
        if deleted {
            self.notify(SessionChange::CoffeeDeleted(id.clone()));
        }
        deleted
    }

    /// Session-level fields (name, location, notes).
    pub fn edit_details(&mut self, edit: impl FnOnce(&mut Session)) -> bool {
        let before = self.session.clone();
        edit(&mut self.session);
        let changed = self.session != before;
        if changed {
            self.notify(SessionChange::DetailsUpdated);
        }
        changed
    }

    /// Swaps in an imported session.
    pub fn replace(&mut self, session: Session) {
        self.session = session;
        self.notify(SessionChange::Replaced);
    }

    /// Starts over with a fresh session, only once the caller has confirmed.
    pub fn reset(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        self.replace(Session::new());
        true
    }

    /// Serializes the session into `sink` if anything changed since the last commit.
    pub fn commit(&mut self, sink: &mut impl SessionSink) -> Result<bool, PersistError> {
        if !self.dirty {
            return Ok(false);
        }
        sink.save(&self.session)?;
        self.dirty = false;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attribute, Score};

    #[derive(Default)]
    struct MemorySink {
        saved: Vec<Session>,
    }

    impl SessionSink for MemorySink {
        fn save(&mut self, session: &Session) -> Result<(), PersistError> {
            self.saved.push(session.clone());
            Ok(())
        }
    }

    fn first_id(store: &SessionStore) -> EntryId {
        store.session().coffees()[0].id().clone()
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut store = SessionStore::new(Session::new());
        let rx = store.subscribe();

        let id = store.add_coffee();
        store.edit_coffee(&id, |e| e.set_score(Attribute::Acidity, Score::new(9.0).unwrap()));
        assert!(store.delete_coffee(&id));

        assert_eq!(rx.try_recv().unwrap(), SessionChange::CoffeeAdded(id.clone()));
        assert_eq!(rx.try_recv().unwrap(), SessionChange::CoffeeUpdated(id.clone()));
        assert_eq!(rx.try_recv().unwrap(), SessionChange::CoffeeDeleted(id));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_locked_edit_is_silent() {
        let mut store = SessionStore::new(Session::new());
        let id = first_id(&store);
        store.edit_coffee(&id, |e| e.lock());
        let rx = store.subscribe();

        let applied = store.edit_coffee(&id, |e| {
            e.set_score(Attribute::Fragrance, Score::new(6.0).unwrap())
        });
        assert_eq!(applied, Some(false));
        assert_eq!(
            store.session().coffee(&id).unwrap().score(Attribute::Fragrance),
            Score::DEFAULT
        );
        assert!(rx.try_recv().is_err());

        assert_eq!(store.edit_coffee(&id, |e| e.toggle_favorite()), Some(true));
        assert_eq!(rx.try_recv().unwrap(), SessionChange::CoffeeUpdated(id));
    }

    #[test]
    fn test_delete_last_is_rejected_without_notification() {
        let mut store = SessionStore::new(Session::new());
        let rx = store.subscribe();
        let id = first_id(&store);
        assert!(!store.delete_coffee(&id));
        assert_eq!(store.session().coffees().len(), 1);
        assert!(rx.try_recv().is_err());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_edit_unknown_entry() {
        let mut store = SessionStore::new(Session::new());
        assert_eq!(store.edit_coffee(&EntryId::new("nope"), |e| e.lock()), None);
    }

    #[test]
    fn test_commit_only_when_dirty() {
        let mut store = SessionStore::new(Session::new());
        let mut sink = MemorySink::default();
        assert!(!store.commit(&mut sink).unwrap());

        store.edit_details(|s| s.set_location("Toulouse"));
        assert!(store.commit(&mut sink).unwrap());
        assert!(!store.commit(&mut sink).unwrap());
        assert_eq!(sink.saved.len(), 1);
        assert_eq!(sink.saved[0].location(), "Toulouse");
    }

    #[test]
    fn test_unchanged_details_stay_clean() {
        let mut store = SessionStore::new(Session::new());
        store.edit_details(|s| s.set_location("Toulouse"));
        let mut sink = MemorySink::default();
        store.commit(&mut sink).unwrap();
        let rx = store.subscribe();

        assert!(!store.edit_details(|_| {}));
        assert!(!store.edit_details(|s| s.set_location("Toulouse")));
        assert!(rx.try_recv().is_err());
        assert!(!store.is_dirty());
        assert!(!store.commit(&mut sink).unwrap());
        assert_eq!(sink.saved.len(), 1);

        assert!(store.edit_details(|s| s.set_location("Lyon")));
        assert_eq!(rx.try_recv().unwrap(), SessionChange::DetailsUpdated);
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut store = SessionStore::new(Session::new());
        store.add_coffee();
        let old_id = store.session().id().clone();

        assert!(!store.reset(false));
        assert_eq!(store.session().coffees().len(), 2);

        assert!(store.reset(true));
        assert_eq!(store.session().coffees().len(), 1);
        assert_ne!(store.session().id(), &old_id);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut store = SessionStore::new(Session::new());
        let rx = store.subscribe();
        drop(rx);
        store.add_coffee();
        assert!(store.subscribers.is_empty());
    }
}
