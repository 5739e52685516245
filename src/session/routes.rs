use std::sync::{Arc, Mutex};

use crate::model::{Destination, topic};
use crate::session::MessageListener;

/// Maps subscriptions and bound queues to their listeners.
///
/// Topic routes may contain wildcards; the first registered route covering an
/// inbound destination wins.
#[derive(Default)]
pub(crate) struct Routes {
    entries: Mutex<Vec<(Destination, Arc<dyn MessageListener>)>>,
}

impl Routes {
    pub fn add(&self, destination: Destination, listener: Arc<dyn MessageListener>) {
        self.entries.lock().unwrap().push((destination, listener));
    }

    pub fn remove(&self, destination: &Destination) {
        self.entries
            .lock()
            .unwrap()
            .retain(|(route, _)| route != destination);
    }

    pub fn lookup(&self, destination: &Destination) -> Option<Arc<dyn MessageListener>> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .find(|(route, _)| covers(route, destination))
            .map(|(_, listener)| listener.clone())
    }

    pub fn listeners(&self) -> Vec<Arc<dyn MessageListener>> {
        let entries = self.entries.lock().unwrap();
        entries.iter().map(|(_, l)| l.clone()).collect()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

fn covers(route: &Destination, destination: &Destination) -> bool {
    match (route, destination) {
        (Destination::Topic(subscription), Destination::Topic(name)) => {
            topic::matches(subscription, name)
        }
        (Destination::Queue(queue), Destination::Queue(name)) => queue == name,
        _ => false,
    }
}
