use std::sync::Mutex;
use timerbot_domain::{Entity, ID};

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find<T: Clone + Entity<ID>>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|val| val.id() == *val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

/// Applies `update` to the entity with the given id while holding the lock,
/// so that the read and the write happen as one step
pub fn update<T: Clone + Entity<ID>, U: FnOnce(&mut T)>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    update: U,
) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let val = collection.iter_mut().find(|val| val.id() == *val_id)?;
    update(val);
    Some(val.clone())
}

pub fn delete<T: Clone + Entity<ID>>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|val| val.id() == *val_id)?;
    Some(collection.remove(index))
}
