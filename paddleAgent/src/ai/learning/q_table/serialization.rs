//! Serialization module for QTable
//!
//! Binary layout, all little-endian:
//!
//! ```text
//! i32 state_count
//! i32 action_count
//! f32 values[state_count * action_count]   // row-major, state first
//! ```
//!
//! There is no version field; a shape change is only detected through the
//! header check. The text export is for inspection and is never read back.

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use csv::WriterBuilder;
use tracing::{debug, warn};

use super::{QTable, QTableIoError};
use crate::ai::actions::paddle_action::N_ACTIONS;
use crate::ai::learning::constants::{ACTION_COLUMN_NAMES, QTABLE_HEADER_BYTES, QTABLE_VALUE_BYTES};
use crate::utils::logging::{self, FileIOType, OperationCategory};

impl QTable {
    /// Write the table in the binary layout
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), QTableIoError> {
        let _timing = logging::start_timing("qtable_save", OperationCategory::FileIO { subcategory: FileIOType::QTableSave });
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&self.to_bytes())?;
        writer.flush()?;

        debug!(path = %path.display(), states = self.n_states(), "saved Q-table");
        Ok(())
    }

    /// Fill this table from a binary file.
    ///
    /// The header must match this table's shape exactly. On any failure the
    /// table is left untouched.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), QTableIoError> {
        let _timing = logging::start_timing("qtable_load", OperationCategory::FileIO { subcategory: FileIOType::QTableLoad });
        let path = path.as_ref();

        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;

        match self.decode(&bytes) {
            Ok(values) => {
                self.replace_values(values);
                debug!(path = %path.display(), states = self.n_states(), "loaded Q-table");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "rejected Q-table file");
                Err(e)
            }
        }
    }

    /// Load `path` into a fresh `n_states` table, or start from zeros when the
    /// file does not exist yet. Any other failure is returned so an existing
    /// file is never mistaken for an empty table.
    pub fn load_or_new<P: AsRef<Path>>(path: P, n_states: usize) -> Result<Self, QTableIoError> {
        let mut table = QTable::new(n_states);
        match table.load_from_file(path) {
            Ok(()) => Ok(table),
            Err(QTableIoError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(QTable::new(n_states)),
            Err(e) => Err(e),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(QTABLE_HEADER_BYTES + self.values().len() * QTABLE_VALUE_BYTES);
        bytes.extend_from_slice(&(self.n_states() as i32).to_le_bytes());
        bytes.extend_from_slice(&(N_ACTIONS as i32).to_le_bytes());
        for value in self.values() {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    /// Validate and decode a full file image into a fresh value buffer.
    /// Trailing bytes after the body are ignored.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<f32>, QTableIoError> {
        if bytes.len() < QTABLE_HEADER_BYTES {
            return Err(QTableIoError::Truncated {
                expected_bytes: QTABLE_HEADER_BYTES,
                found_bytes: bytes.len(),
            });
        }

        let states = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let actions = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if states as i64 != self.n_states() as i64 || actions as i64 != N_ACTIONS as i64 {
            return Err(QTableIoError::ShapeMismatch {
                expected: (self.n_states(), N_ACTIONS),
                found: (states, actions),
            });
        }

        let count = self.n_states() * N_ACTIONS;
        let expected_bytes = QTABLE_HEADER_BYTES + count * QTABLE_VALUE_BYTES;
        if bytes.len() < expected_bytes {
            return Err(QTableIoError::Truncated {
                expected_bytes,
                found_bytes: bytes.len(),
            });
        }

        let values = bytes[QTABLE_HEADER_BYTES..expected_bytes]
            .chunks_exact(QTABLE_VALUE_BYTES)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(values)
    }

    /// Human-readable dump: a shape line, a column header, then one row per state
    /// with six decimal places.
    pub fn save_text<P: AsRef<Path>>(&self, path: P) -> Result<(), QTableIoError> {
        let _timing = logging::start_timing("qtable_save_text", OperationCategory::FileIO { subcategory: FileIOType::TextDump });
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;
        writer.write_record([format!("Q-Table: {} states x {} actions", self.n_states(), N_ACTIONS)])?;

        let mut header = vec!["State"];
        header.extend_from_slice(&ACTION_COLUMN_NAMES);
        writer.write_record(&header)?;

        for state in 0..self.n_states() {
            let mut record = Vec::with_capacity(N_ACTIONS + 1);
            record.push(state.to_string());
            record.extend(self.row(state).iter().map(|v| format!("{:.6}", v)));
            writer.write_record(&record)?;
        }
        writer.flush()?;

        debug!(path = %path.display(), "wrote Q-table text dump");
        Ok(())
    }
}
