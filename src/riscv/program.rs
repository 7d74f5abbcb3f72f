use std::collections::HashMap;

use super::decoder::operands::split_label;
use super::errors::InterpError;
use super::instruction::Target;

/// Address of the first instruction slot. PCs below it mean "finished".
pub const BASE_ADDRESS: u32 = 16;
/// Bytes per instruction slot.
pub const SLOT_SIZE: u32 = 4;

/// Loaded program text plus the label table built from it.
///
/// Every line, labels and blanks included, occupies one slot. A label alone
/// on its line resolves to the slot right after its own; `name: instr`
/// resolves to its own slot.
#[derive(Debug, Default, Clone)]
pub struct Program {
    lines: Vec<String>,
    labels: HashMap<String, u32>,
}

impl Program {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let mut labels = HashMap::new();
        for (i, line) in lines.iter().enumerate() {
            let Some((name, rest)) = split_label(line) else { continue };
            let addr = if rest.is_empty() { slot_address(i) + SLOT_SIZE } else { slot_address(i) };
            if let Some(prev) = labels.insert(name.to_string(), addr) {
                log::warn!("label `{name}` redefined on line {}: {prev} -> {addr}", i + 1);
            }
        }
        log::debug!("loaded {} lines, {} labels", lines.len(), labels.len());
        Self { lines, labels }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn labels(&self) -> &HashMap<String, u32> {
        &self.labels
    }

    pub fn label(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    /// Slot index for `pc`, or `None` if it is below the base or past the
    /// last line.
    pub fn slot(&self, pc: u32) -> Option<usize> {
        let idx = (pc.checked_sub(BASE_ADDRESS)? / SLOT_SIZE) as usize;
        (idx < self.lines.len()).then_some(idx)
    }

    pub fn line_at(&self, pc: u32) -> Option<&str> {
        self.slot(pc).map(|i| self.lines[i].as_str())
    }

    /// Byte displacement from `pc` to `target`.
    pub fn displacement(&self, target: &Target, pc: u32) -> Result<i32, InterpError> {
        match target {
            Target::Offset(d) => Ok(*d),
            Target::Label(name) => self
                .label(name)
                .map(|addr| addr.wrapping_sub(pc) as i32)
                .ok_or_else(|| InterpError::UnresolvedLabel(name.clone())),
        }
    }
}

/// Address of slot `idx`.
pub fn slot_address(idx: usize) -> u32 {
    (idx as u32).wrapping_mul(SLOT_SIZE).wrapping_add(BASE_ADDRESS)
}
