use std::collections::VecDeque;
use std::ops::Range;

/// Bytes that must be addressable past `addr` for any access to go through.
const ACCESS_WINDOW: usize = 4;

/// Flat little-endian byte memory.
///
/// Every access, whatever its width, needs a full word of room: `addr + 4`
/// must not pass the end of memory. An access that does not fit is dropped:
/// loads read as zero, stores do nothing, and no history entry is written.
#[derive(Debug, Clone)]
pub struct Memory {
    mem: Vec<u8>,
    // most recent first
    history: VecDeque<String>,
}

impl Memory {
    pub fn new(size: usize) -> Self {
        Self {
            mem: vec![0; size],
            history: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.mem
    }

    /// Human-readable access log, most recent first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.history.iter().map(String::as_str)
    }

    /// Zeroes every byte and forgets the history.
    pub fn clear(&mut self) {
        self.mem.fill(0);
        self.history.clear();
    }

    fn range(&self, addr: u32, width: usize) -> Option<Range<usize>> {
        let start = addr as usize;
        let end = start.checked_add(width)?;
        let limit = start.checked_add(ACCESS_WINDOW)?;
        if limit <= self.mem.len() {
            Some(start..end)
        } else {
            log::warn!(
                "dropped {width}-byte access at address {addr}: memory is {} bytes",
                self.mem.len()
            );
            None
        }
    }

    fn record(&mut self, entry: String) {
        self.history.push_front(entry);
    }

    // 8-bit

    pub fn load_byte(&mut self, addr: u32) -> u8 {
        let Some(r) = self.range(addr, 1) else { return 0 };
        let v = self.mem[r.start];
        self.record(format!("Loaded byte ({v}) from address {addr}"));
        v
    }

    pub fn store_byte(&mut self, addr: u32, value: i32) {
        let Some(r) = self.range(addr, 1) else { return };
        let v = value as u8;
        self.mem[r.start] = v;
        self.record(format!("Stored byte ({v}) to address {addr}"));
    }

    // 16-bit

    pub fn load_half(&mut self, addr: u32) -> u16 {
        let Some(r) = self.range(addr, 2) else { return 0 };
        let mut buf = [0u8; 2];
        buf.copy_from_slice(&self.mem[r]);
        let v = u16::from_le_bytes(buf);
        self.record(format!("Loaded half-word ({v}) from address {addr}"));
        v
    }

    pub fn store_half(&mut self, addr: u32, value: i32) {
        let Some(r) = self.range(addr, 2) else { return };
        let v = value as u16;
        self.mem[r].copy_from_slice(&v.to_le_bytes());
        self.record(format!("Stored half-word ({v}) to address {addr}"));
    }

    // 32-bit

    pub fn load_word(&mut self, addr: u32) -> i32 {
        let Some(r) = self.range(addr, 4) else { return 0 };
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.mem[r]);
        let v = i32::from_le_bytes(buf);
        self.record(format!("Loaded word ({v}) from address {addr}"));
        v
    }

    pub fn store_word(&mut self, addr: u32, value: i32) {
        let Some(r) = self.range(addr, 4) else { return };
        self.mem[r].copy_from_slice(&value.to_le_bytes());
        self.record(format!("Stored word ({value}) to address {addr}"));
    }
}
