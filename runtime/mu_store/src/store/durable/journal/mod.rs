//! Append-only write-ahead journal.
//!
//! Every mutation is framed as `[len: u32 LE][checksum: u64 LE][payload]`
//! where the payload is a bincode `Record` and the checksum is FNV-1a over
//! the payload. Replay stops at the first frame that is short or fails its
//! checksum; everything from that point on is a torn tail and is truncated.
//!
//! An I/O failure on the live journal poisons it: the file may now end in a
//! partial frame, so nothing more is appended and every later write or sync
//! fails with `StoreError::Poisoned`. Replay then drops only the partial
//! frame and keeps everything synced before it.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use mu_key::SubscriptKey;
use mu_value::Value;
use serde::{Deserialize, Serialize};

use super::CommitPolicy;
use crate::errors::{StoreError, StoreResult};

const HEADER_LEN: usize = 12;

/// One journaled mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Record {
    Put { key: SubscriptKey, value: Value },
    Remove { key: SubscriptKey },
    RemoveSubtree { prefix: SubscriptKey },
}

/// Outcome of decoding a journal image.
#[derive(Debug)]
pub(crate) struct Replay {
    pub(crate) records: Vec<Record>,
    /// Byte length of the intact prefix.
    pub(crate) valid_len: u64,
    pub(crate) torn: bool,
}

pub(crate) fn fnv1a(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

pub(crate) fn encode_frame(record: &Record) -> StoreResult<Vec<u8>> {
    let payload = bincode::serialize(record)?;
    let len = u32::try_from(payload.len()).map_err(|_| StoreError::RecordTooLarge {
        size: payload.len(),
    })?;
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&fnv1a(&payload).to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

pub(crate) fn decode_frames(bytes: &[u8]) -> Replay {
    let mut records = Vec::new();
    let mut offset = 0usize;
    while offset < bytes.len() {
        let Some((record, next)) = decode_frame(bytes, offset) else {
            break;
        };
        records.push(record);
        offset = next;
    }
    Replay {
        records,
        valid_len: offset as u64,
        torn: offset < bytes.len(),
    }
}

fn decode_frame(bytes: &[u8], offset: usize) -> Option<(Record, usize)> {
    let header = bytes.get(offset..offset.checked_add(HEADER_LEN)?)?;
    let len = u32::from_le_bytes(header.get(..4)?.try_into().ok()?);
    let checksum = u64::from_le_bytes(header.get(4..)?.try_into().ok()?);
    let start = offset + HEADER_LEN;
    let end = start.checked_add(usize::try_from(len).ok()?)?;
    let payload = bytes.get(start..end)?;
    if fnv1a(payload) != checksum {
        return None;
    }
    let record = bincode::deserialize(payload).ok()?;
    Some((record, end))
}

/// Open handle on a journal file positioned for appends.
#[derive(Debug)]
pub(crate) struct Journal {
    path: PathBuf,
    writer: BufWriter<File>,
    policy: CommitPolicy,
    pending: usize,
    poisoned: bool,
}

impl Journal {
    /// Open (or create) the journal at `path`, returning the records that
    /// survive replay. A torn tail is cut off before appending resumes.
    pub(crate) fn open(path: &Path, policy: CommitPolicy) -> StoreResult<(Self, Vec<Record>)> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(StoreError::io(path, err)),
        };
        let replay = decode_frames(&bytes);
        let file = open_append(path).map_err(|err| StoreError::io(path, err))?;
        if replay.torn {
            tracing::warn!(
                path = %path.display(),
                kept = replay.valid_len,
                dropped = bytes.len() as u64 - replay.valid_len,
                "truncating torn journal tail"
            );
            file.set_len(replay.valid_len)
                .and_then(|()| file.sync_all())
                .map_err(|err| StoreError::io(path, err))?;
        }
        let journal = Journal {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            policy,
            pending: 0,
            poisoned: false,
        };
        Ok((journal, replay.records))
    }

    /// Append one record, syncing if the commit policy says so.
    pub(crate) fn append(&mut self, record: &Record) -> StoreResult<()> {
        self.check_usable()?;
        let frame = encode_frame(record)?;
        self.writer.write_all(&frame).map_err(|err| self.poison(err))?;
        self.pending += 1;
        if self.policy.should_sync(self.pending) {
            self.sync()?;
        }
        Ok(())
    }

    /// Flush buffered frames and fsync them.
    pub(crate) fn sync(&mut self) -> StoreResult<()> {
        self.check_usable()?;
        self.writer
            .flush()
            .and_then(|()| self.writer.get_ref().sync_data())
            .map_err(|err| self.poison(err))?;
        self.pending = 0;
        Ok(())
    }

    pub(crate) fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn check_usable(&self) -> StoreResult<()> {
        if self.poisoned {
            return Err(StoreError::Poisoned {
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    #[cold]
    fn poison(&mut self, err: io::Error) -> StoreError {
        tracing::error!(
            path = %self.path.display(),
            error = %err,
            "journal write failed, refusing further writes"
        );
        self.poisoned = true;
        StoreError::io(&self.path, err)
    }

    /// Records appended since the last sync.
    pub(crate) fn pending(&self) -> usize {
        self.pending
    }

    /// Replace the journal with one `Put` per live entry.
    ///
    /// The new image is written beside the journal, synced, then renamed
    /// over it, so a crash at any point leaves one complete journal. The
    /// rename itself is made durable by syncing the directory.
    pub(crate) fn rewrite<'a>(
        &mut self,
        entries: impl Iterator<Item = (&'a SubscriptKey, &'a Value)>,
    ) -> StoreResult<usize> {
        self.sync()?;
        let tmp = self.path.with_extension("journal.tmp");
        let mut count = 0;
        {
            let file = File::create(&tmp).map_err(|err| StoreError::io(&tmp, err))?;
            let mut writer = BufWriter::new(file);
            for (key, value) in entries {
                let frame = encode_frame(&Record::Put {
                    key: key.clone(),
                    value: value.clone(),
                })?;
                writer
                    .write_all(&frame)
                    .map_err(|err| StoreError::io(&tmp, err))?;
                count += 1;
            }
            writer
                .flush()
                .and_then(|()| writer.get_ref().sync_all())
                .map_err(|err| StoreError::io(&tmp, err))?;
        }
        fs::rename(&tmp, &self.path).map_err(|err| self.poison(err))?;
        // The old handle now points at an unlinked file.
        let file = open_append(&self.path).map_err(|err| self.poison(err))?;
        self.writer = BufWriter::new(file);
        sync_parent(&self.path).map_err(|err| self.poison(err))?;
        Ok(count)
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(unix)]
fn sync_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => File::open(dir)?.sync_all(),
        _ => Ok(()),
    }
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> io::Result<()> {
    Ok(())
}
