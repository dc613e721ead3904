//! Little-endian wire primitives and the message header.
//!
//! Every multi-byte integer in a DMBC message is little-endian. Writers
//! append to a `Vec<u8>`; [`Reader`] walks a borrowed buffer and reports
//! truncation as [`TxError::Decode`].

use dmbc_types::constants::{HEADER_LENGTH, PUBLIC_KEY_LENGTH};
use dmbc_types::PublicKey;

use crate::config::MessageConfig;
use crate::TxError;

// ─── Header ─────────────────────────────────────────────────────────────────

/// Fixed 10-byte message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub network_id: u8,
    pub protocol_version: u8,
    pub message_id: u16,
    pub service_id: u16,
    /// Total message length in bytes, header included.
    pub payload_length: u32,
}

impl MessageHeader {
    pub fn new(config: &MessageConfig, message_id: u16, payload_length: u32) -> Self {
        Self {
            network_id: config.network_id,
            protocol_version: config.protocol_version,
            message_id,
            service_id: config.service_id,
            payload_length,
        }
    }

    pub fn config(&self) -> MessageConfig {
        MessageConfig::new(self.network_id, self.protocol_version, self.service_id)
    }

    pub fn write(&self, buf: &mut Vec<u8>) {
        buf.push(self.network_id);
        buf.push(self.protocol_version);
        write_u16_le(buf, self.message_id);
        write_u16_le(buf, self.service_id);
        write_u32_le(buf, self.payload_length);
    }

    pub fn read(reader: &mut Reader<'_>) -> Result<Self, TxError> {
        if reader.remaining() < HEADER_LENGTH {
            return Err(TxError::Decode(format!(
                "message is {} bytes, header needs {}",
                reader.remaining(),
                HEADER_LENGTH
            )));
        }
        Ok(Self {
            network_id: reader.read_u8()?,
            protocol_version: reader.read_u8()?,
            message_id: reader.read_u16_le()?,
            service_id: reader.read_u16_le()?,
            payload_length: reader.read_u32_le()?,
        })
    }
}

// ─── Writers ────────────────────────────────────────────────────────────────

pub fn write_u16_le(buf: &mut Vec<u8>, val: u16) {
    buf.extend_from_slice(&val.to_le_bytes());
}

pub fn write_u32_le(buf: &mut Vec<u8>, val: u32) {
    buf.extend_from_slice(&val.to_le_bytes());
}

pub fn write_u64_le(buf: &mut Vec<u8>, val: u64) {
    buf.extend_from_slice(&val.to_le_bytes());
}

/// Write a string prefixed by its one-byte length. Callers validate that
/// the string fits.
pub fn write_short_str(buf: &mut Vec<u8>, s: &str) {
    debug_assert!(s.len() <= u8::MAX as usize);
    buf.push(s.len() as u8);
    buf.extend_from_slice(s.as_bytes());
}

// ─── Reader ─────────────────────────────────────────────────────────────────

/// Cursor over an encoded message.
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], TxError> {
        if self.remaining() < n {
            return Err(TxError::Decode(format!(
                "unexpected end of data at offset {}: need {} bytes, have {}",
                self.pos,
                n,
                self.remaining()
            )));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, TxError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, TxError> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, TxError> {
        let mut arr = [0u8; 4];
        arr.copy_from_slice(self.read_bytes(4)?);
        Ok(u32::from_le_bytes(arr))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, TxError> {
        let mut arr = [0u8; 8];
        arr.copy_from_slice(self.read_bytes(8)?);
        Ok(u64::from_le_bytes(arr))
    }

    pub fn read_public_key(&mut self) -> Result<PublicKey, TxError> {
        Ok(PublicKey::from_slice(self.read_bytes(PUBLIC_KEY_LENGTH)?)?)
    }

    pub fn read_short_str(&mut self) -> Result<&'a str, TxError> {
        let len = self.read_u8()? as usize;
        let at = self.pos;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map_err(|e| TxError::Decode(format!("string at offset {} is not UTF-8: {}", at, e)))
    }
}
