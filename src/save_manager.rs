use crate::character::Character;
use crate::core::constants::{SAVE_FORMAT_VERSION, SAVE_SLOT, SAVE_VERSION_MAGIC};
use crate::quests::Quest;
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("invalid save magic: expected 0x{expected:016X}, got 0x{found:016X}")]
    BadMagic { expected: u64, found: u64 },

    #[error("payload length {declared} does not match the {available} bytes in the file")]
    LengthMismatch { declared: u64, available: u64 },

    #[error("checksum verification failed")]
    ChecksumMismatch,

    #[error("unsupported save version {0}")]
    UnsupportedVersion(u32),

    #[error("could not determine config directory")]
    NoDataDir,
}

/// The persisted record: character and quest log only. Dungeons are
/// regenerated on every entry and never saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub version: u32,
    pub character: Character,
    pub quests: Vec<Quest>,
    /// Unix seconds
    pub last_save_time: i64,
}

impl SaveSnapshot {
    /// Stamps a snapshot with the current time.
    pub fn new(character: Character, quests: Vec<Quest>) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            character,
            quests,
            last_save_time: chrono::Utc::now().timestamp(),
        }
    }
}

/// A single-slot key-value store for the snapshot.
pub trait SnapshotStore {
    /// `None` means no character exists yet.
    fn load(&self) -> Result<Option<SaveSnapshot>, SaveError>;
    fn save(&mut self, snapshot: &SaveSnapshot) -> Result<(), SaveError>;
    /// Removes the slot. Clearing an empty slot is not an error.
    fn clear(&mut self) -> Result<(), SaveError>;
}

/// Saves and loads the snapshot with a checksummed binary format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager in the platform config directory
    pub fn new() -> Result<Self, SaveError> {
        let project_dirs =
            ProjectDirs::from("", "", "dungeon-legacy").ok_or(SaveError::NoDataDir)?;
        Self::with_dir(project_dirs.config_dir())
    }

    /// Creates a SaveManager that keeps its slot under `dir`
    pub fn with_dir(dir: &Path) -> Result<Self, SaveError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            save_path: dir.join(format!("{SAVE_SLOT}.dat")),
        })
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized snapshot (variable length)
    /// - SHA256 checksum (32 bytes)
    fn write_file(&self, snapshot: &SaveSnapshot) -> Result<(), SaveError> {
        let data = bincode::serialize(snapshot)?;
        let data_len = data.len() as u32;

        // Checksum covers magic + length + data
        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;
        Ok(())
    }

    fn read_file(&self) -> Result<SaveSnapshot, SaveError> {
        let mut file = fs::File::open(&self.save_path)?;
        let file_len = file.metadata()?.len();

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        let magic = u64::from_le_bytes(magic_bytes);
        if magic != SAVE_VERSION_MAGIC {
            return Err(SaveError::BadMagic {
                expected: SAVE_VERSION_MAGIC,
                found: magic,
            });
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        // magic + length header, SHA-256 trailer
        let available = file_len.saturating_sub(8 + 4 + 32);
        if u64::from(data_len) != available {
            return Err(SaveError::LengthMismatch {
                declared: u64::from(data_len),
                available,
            });
        }

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(SaveError::ChecksumMismatch);
        }

        let snapshot: SaveSnapshot = bincode::deserialize(&data)?;
        if snapshot.version != SAVE_FORMAT_VERSION {
            return Err(SaveError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }
}

impl SnapshotStore for SaveManager {
    fn load(&self) -> Result<Option<SaveSnapshot>, SaveError> {
        if !self.save_exists() {
            return Ok(None);
        }
        match self.read_file() {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!("rejected save file {}: {}", self.save_path.display(), e);
                Err(e)
            }
        }
    }

    fn save(&mut self, snapshot: &SaveSnapshot) -> Result<(), SaveError> {
        self.write_file(snapshot)?;
        info!(
            "saved {} (level {}) to {}",
            snapshot.character.name,
            snapshot.character.level,
            self.save_path.display()
        );
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        if self.save_exists() {
            fs::remove_file(&self.save_path)?;
            info!("cleared save slot {}", SAVE_SLOT);
        }
        Ok(())
    }
}

/// In-process store, nothing touches the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<SaveSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<SaveSnapshot>, SaveError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, snapshot: &SaveSnapshot) -> Result<(), SaveError> {
        self.slot = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.slot = None;
        Ok(())
    }
}
