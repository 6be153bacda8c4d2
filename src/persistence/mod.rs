//! Persisted profile data and the storage it lives in.

pub mod backup;
pub mod profile;
pub mod store;

pub use backup::{merge_backup, parse_backup, BackupData, ImportSummary, ParsedBackup};
pub use profile::{decode_save, decode_template, Profile, SaveData, SaveType};
pub use store::{JsonFileStore, MemoryStore, Store};
