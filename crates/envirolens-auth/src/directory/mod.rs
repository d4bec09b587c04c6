//! User profile documents and the username directory.

mod api;
mod area;
mod firestore;
mod store;

pub use area::{Area, UnknownAreaError};
pub use firestore::FirestoreDocumentStore;
pub use store::{DocumentStoreError, UserDocumentStore, UserProfile, UserRecord};
