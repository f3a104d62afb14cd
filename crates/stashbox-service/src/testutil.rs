//! In-memory fakes for exercising services without a database or a
//! live media host.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use stashbox_core::error::AppError;
use stashbox_core::result::AppResult;
use stashbox_core::traits::{BlobStore, StoredBlob};
use stashbox_database::repositories::{FileStore, FolderStore, UserStore};
use stashbox_entity::file::{CreateFile, StoredFile};
use stashbox_entity::folder::{CreateFolder, Folder};
use stashbox_entity::user::{CreateUser, User};

/// A recorded mutation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    FolderDeleted(Uuid),
    FileDeleted(Uuid),
}

/// In-memory folder/file records implementing both store traits.
///
/// Folder deletion enforces the schema's RESTRICT semantics: deleting a
/// folder that still has children or files is an error, so any ordering
/// violation in the walk fails loudly.
#[derive(Debug, Default)]
pub struct InMemoryTree {
    folders: Mutex<HashMap<Uuid, Folder>>,
    files: Mutex<HashMap<Uuid, StoredFile>>,
    pub log: Mutex<Vec<Event>>,
    fail_children_of: Mutex<HashSet<Uuid>>,
    fail_delete_folder: Mutex<HashSet<Uuid>>,
    fail_delete_file: Mutex<HashSet<Uuid>>,
    fail_create_file: AtomicBool,
}

impl InMemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&self, user_id: Uuid, parent_id: Option<Uuid>, name: &str) -> Folder {
        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            user_id,
            parent_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.folders.lock().unwrap().insert(folder.id, folder.clone());
        folder
    }

    pub fn add_file(&self, folder_id: Uuid, name: &str, public_id: &str) -> StoredFile {
        let file = StoredFile {
            id: Uuid::new_v4(),
            folder_id,
            name: name.to_string(),
            url: format!("https://media.test/blobs/{public_id}/{name}"),
            public_id: public_id.to_string(),
            size_bytes: 3,
            uploaded_at: Utc::now(),
        };
        self.files.lock().unwrap().insert(file.id, file.clone());
        file
    }

    pub fn fail_children_of(&self, id: Uuid) {
        self.fail_children_of.lock().unwrap().insert(id);
    }

    pub fn fail_delete_folder(&self, id: Uuid) {
        self.fail_delete_folder.lock().unwrap().insert(id);
    }

    pub fn fail_delete_file(&self, id: Uuid) {
        self.fail_delete_file.lock().unwrap().insert(id);
    }

    pub fn fail_next_create_file(&self) {
        self.fail_create_file.store(true, Ordering::SeqCst);
    }

    pub fn folder_exists(&self, id: Uuid) -> bool {
        self.folders.lock().unwrap().contains_key(&id)
    }

    pub fn file_exists(&self, id: Uuid) -> bool {
        self.files.lock().unwrap().contains_key(&id)
    }

    pub fn folder_count(&self) -> usize {
        self.folders.lock().unwrap().len()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    /// Position of an event in the mutation log, if present.
    pub fn log_position(&self, event: &Event) -> Option<usize> {
        self.log.lock().unwrap().iter().position(|e| e == event)
    }
}

#[async_trait]
impl FolderStore for InMemoryTree {
    async fn find(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.folders.lock().unwrap().get(&id).cloned())
    }

    async fn find_root(&self, user_id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self
            .folders
            .lock()
            .unwrap()
            .values()
            .find(|f| f.user_id == user_id && f.parent_id.is_none())
            .cloned())
    }

    async fn children_of(&self, id: Uuid) -> AppResult<Vec<Folder>> {
        if self.fail_children_of.lock().unwrap().contains(&id) {
            return Err(AppError::database("Injected children_of failure"));
        }
        Ok(self
            .folders
            .lock()
            .unwrap()
            .values()
            .filter(|f| f.parent_id == Some(id))
            .cloned()
            .collect())
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        Ok(self.add_folder(data.user_id, data.parent_id, &data.name))
    }

    async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<Folder> {
        let mut folders = self.folders.lock().unwrap();
        let folder = folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.name = new_name.to_string();
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        if self.fail_delete_folder.lock().unwrap().contains(&id) {
            return Err(AppError::database("Injected folder delete failure"));
        }

        let has_children = self
            .folders
            .lock()
            .unwrap()
            .values()
            .any(|f| f.parent_id == Some(id));
        let has_files = self
            .files
            .lock()
            .unwrap()
            .values()
            .any(|f| f.folder_id == id);
        if has_children || has_files {
            return Err(AppError::database(
                "Foreign key violation: folder still referenced",
            ));
        }

        let removed = self.folders.lock().unwrap().remove(&id).is_some();
        if removed {
            self.log.lock().unwrap().push(Event::FolderDeleted(id));
        }
        Ok(removed)
    }
}

#[async_trait]
impl FileStore for InMemoryTree {
    async fn find(&self, id: Uuid) -> AppResult<Option<StoredFile>> {
        Ok(self.files.lock().unwrap().get(&id).cloned())
    }

    async fn in_folder(&self, folder_id: Uuid) -> AppResult<Vec<StoredFile>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .values()
            .filter(|f| f.folder_id == folder_id)
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, folder_id: Uuid, name: &str) -> AppResult<Option<StoredFile>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .values()
            .find(|f| f.folder_id == folder_id && f.name == name)
            .cloned())
    }

    async fn create(&self, data: &CreateFile) -> AppResult<StoredFile> {
        if self.fail_create_file.swap(false, Ordering::SeqCst) {
            return Err(AppError::database("Injected file create failure"));
        }

        let file = StoredFile {
            id: Uuid::new_v4(),
            folder_id: data.folder_id,
            name: data.name.clone(),
            url: data.url.clone(),
            public_id: data.public_id.clone(),
            size_bytes: data.size_bytes,
            uploaded_at: Utc::now(),
        };
        self.files.lock().unwrap().insert(file.id, file.clone());
        Ok(file)
    }

    async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<StoredFile> {
        let mut files = self.files.lock().unwrap();
        let file = files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
        file.name = new_name.to_string();
        Ok(file.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        if self.fail_delete_file.lock().unwrap().contains(&id) {
            return Err(AppError::database("Injected file delete failure"));
        }

        let removed = self.files.lock().unwrap().remove(&id).is_some();
        if removed {
            self.log.lock().unwrap().push(Event::FileDeleted(id));
        }
        Ok(removed)
    }
}

/// In-memory user records with the email uniqueness of the real table.
#[derive(Debug, Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, email: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "$argon2id$unused".to_string(),
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().insert(user.id, user.clone());
        user
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == data.email) {
            return Err(AppError::conflict(format!(
                "A user with email '{}' already exists",
                data.email
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// Blob store fake that records every call and can inject failures.
///
/// Tracks the peak number of concurrently running deletes so tests can
/// assert the walk's concurrency cap.
#[derive(Debug, Default)]
pub struct RecordingBlobStore {
    pub uploaded: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
    fail_delete: Mutex<HashSet<String>>,
    fail_upload: AtomicBool,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl RecordingBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_delete_of(&self, public_id: &str) {
        self.fail_delete.lock().unwrap().insert(public_id.to_string());
    }

    pub fn fail_next_upload(&self) {
        self.fail_upload.store(true, Ordering::SeqCst);
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    fn provider_type(&self) -> &str {
        "recording"
    }

    async fn upload(&self, name: &str, data: Bytes) -> AppResult<StoredBlob> {
        if self.fail_upload.swap(false, Ordering::SeqCst) {
            return Err(AppError::remote_store("Injected upload failure"));
        }

        let public_id = format!("blob-{}", Uuid::new_v4());
        self.uploaded.lock().unwrap().push(public_id.clone());

        Ok(StoredBlob {
            url: format!("https://media.test/blobs/{public_id}/{name}"),
            public_id,
            size_bytes: data.len() as i64,
        })
    }

    async fn delete(&self, public_id: &str) -> AppResult<()> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_delete.lock().unwrap().contains(public_id) {
            return Err(AppError::remote_store(format!(
                "Injected delete failure for '{public_id}'"
            )));
        }

        self.deleted.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}
