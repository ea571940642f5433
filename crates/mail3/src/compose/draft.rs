//! Resettable draft field store

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::models::Address;

/// Header fields of a draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFields {
    pub subject: String,
    pub from: Option<Address>,
    pub to: Vec<Address>,
    pub cc: Vec<Address>,
    pub bcc: Vec<Address>,
}

impl DraftFields {
    /// True when every field holds its default
    pub fn is_empty(&self) -> bool {
        self.subject.is_empty()
            && self.from.is_none()
            && self.to.is_empty()
            && self.cc.is_empty()
            && self.bcc.is_empty()
    }
}

/// State container for the draft being edited
///
/// All fields live in one watch cell. Each setter is a single transition
/// touching one field; `reset` swaps the whole record, so subscribers see
/// either the old draft or the empty one.
#[derive(Debug)]
pub struct DraftStore {
    fields: watch::Sender<DraftFields>,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftStore {
    pub fn new() -> Self {
        let (fields, _) = watch::channel(DraftFields::default());
        Self { fields }
    }

    /// Current snapshot of all fields
    pub fn read(&self) -> DraftFields {
        self.fields.borrow().clone()
    }

    /// Receiver notified after every committed change
    pub fn subscribe(&self) -> watch::Receiver<DraftFields> {
        self.fields.subscribe()
    }

    pub fn set_subject(&self, subject: impl Into<String>) {
        let subject = subject.into();
        self.fields.send_modify(|f| f.subject = subject);
    }

    pub fn set_from(&self, from: Option<Address>) {
        self.fields.send_modify(|f| f.from = from);
    }

    pub fn set_to(&self, to: Vec<Address>) {
        self.fields.send_modify(|f| f.to = to);
    }

    pub fn set_cc(&self, cc: Vec<Address>) {
        self.fields.send_modify(|f| f.cc = cc);
    }

    pub fn set_bcc(&self, bcc: Vec<Address>) {
        self.fields.send_modify(|f| f.bcc = bcc);
    }

    /// Restore every field to its default in one transition
    pub fn reset(&self) {
        self.fields.send_replace(DraftFields::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn fill(store: &DraftStore) {
        store.set_subject("Hello");
        store.set_from(Some(Address::new("me@mail3.me")));
        store.set_to(vec![Address::new("x@y")]);
        store.set_cc(vec![Address::new("cc@y")]);
        store.set_bcc(vec![Address::new("bcc@y")]);
    }

    #[test]
    fn test_defaults() {
        let fields = DraftStore::new().read();
        assert!(fields.is_empty());
        assert_eq!(fields.subject, "");
        assert_eq!(fields.from, None);
    }

    #[test]
    fn test_setters_touch_one_field() {
        let store = DraftStore::new();
        store.set_to(vec![Address::new("a@x"), Address::new("b@x")]);
        store.set_subject("Hi");

        let fields = store.read();
        assert_eq!(fields.subject, "Hi");
        assert_eq!(fields.to, vec![Address::new("a@x"), Address::new("b@x")]);
        assert!(fields.cc.is_empty());
        assert!(fields.bcc.is_empty());
        assert_eq!(fields.from, None);
    }

    #[test]
    fn test_reset_clears_all_fields() {
        let store = DraftStore::new();
        store.set_to(vec![Address::new("x@y")]);
        fill(&store);

        store.reset();

        let fields = store.read();
        assert!(fields.to.is_empty());
        assert_eq!(fields.subject, "");
        assert_eq!(fields.from, None);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_subscriber_sees_reset_as_one_change() {
        let store = DraftStore::new();
        fill(&store);
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.reset();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_concurrent_setters_do_not_interfere() {
        let store = Arc::new(DraftStore::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for n in 0..200 {
                        match i {
                            0 => store.set_subject(format!("s{}", n)),
                            1 => store.set_to(vec![Address::new(format!("to{}@x", n))]),
                            2 => store.set_cc(vec![Address::new(format!("cc{}@x", n))]),
                            _ => store.set_bcc(vec![Address::new(format!("bcc{}@x", n))]),
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let fields = store.read();
        assert_eq!(fields.subject, "s199");
        assert_eq!(fields.to, vec![Address::new("to199@x")]);
        assert_eq!(fields.cc, vec![Address::new("cc199@x")]);
        assert_eq!(fields.bcc, vec![Address::new("bcc199@x")]);
    }

    #[test]
    fn test_readers_never_observe_partial_reset() {
        let store = Arc::new(DraftStore::new());
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let done = Arc::clone(&done);
                std::thread::spawn(move || {
                    while !done.load(Ordering::Acquire) {
                        let fields = store.read();
                        let full = fields.subject == "Hello"
                            && fields.from.is_some()
                            && fields.to.len() == 1
                            && fields.cc.len() == 1
                            && fields.bcc.len() == 1;
                        assert!(full || fields.is_empty(), "mixed snapshot: {:?}", fields);
                    }
                })
            })
            .collect();

        for _ in 0..500 {
            store.fields.send_replace(DraftFields {
                subject: "Hello".to_string(),
                from: Some(Address::new("me@mail3.me")),
                to: vec![Address::new("x@y")],
                cc: vec![Address::new("cc@y")],
                bcc: vec![Address::new("bcc@y")],
            });
            store.reset();
        }
        done.store(true, Ordering::Release);

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
