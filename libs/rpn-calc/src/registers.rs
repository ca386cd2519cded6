//! Register file
//!
//! A fixed bank of numbered `f64` registers. Registers 2..=7 hold the
//! statistics sums and are only written through [`RegisterFile::commit_stats`]
//! and [`RegisterFile::clear_stats`]; the others are general purpose.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::stats::StatSums;

/// Smallest register file that still holds every statistics register
pub const MIN_REGISTERS: usize = 8;

/// Named statistics registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatRegister {
    /// n, number of accumulated pairs
    Count,
    /// Σx
    SumX,
    /// Σx²
    SumX2,
    /// Σy
    SumY,
    /// Σy²
    SumY2,
    /// Σxy
    SumXY,
}

impl StatRegister {
    pub const ALL: [StatRegister; 6] = [
        StatRegister::Count,
        StatRegister::SumX,
        StatRegister::SumX2,
        StatRegister::SumY,
        StatRegister::SumY2,
        StatRegister::SumXY,
    ];

    /// Register index backing this quantity
    pub fn index(self) -> usize {
        match self {
            StatRegister::Count => 2,
            StatRegister::SumX => 3,
            StatRegister::SumX2 => 4,
            StatRegister::SumY => 5,
            StatRegister::SumY2 => 6,
            StatRegister::SumXY => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatRegister::Count => "n",
            StatRegister::SumX => "Σx",
            StatRegister::SumX2 => "Σx²",
            StatRegister::SumY => "Σy",
            StatRegister::SumY2 => "Σy²",
            StatRegister::SumXY => "Σxy",
        }
    }

    pub fn is_reserved(index: usize) -> bool {
        (2..=7).contains(&index)
    }
}

#[derive(Debug, Clone)]
pub struct RegisterFile {
    slots: Vec<f64>,
}

impl RegisterFile {
    /// `size` is raised to [`MIN_REGISTERS`] if smaller
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![0.0; size.max(MIN_REGISTERS)],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<f64> {
        self.slots
            .get(index)
            .copied()
            .ok_or(CalcError::RegisterOutOfRange {
                index,
                size: self.slots.len(),
            })
    }

    /// Write a general-purpose register
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        let size = self.slots.len();
        if StatRegister::is_reserved(index) {
            return Err(CalcError::ReservedRegister(index));
        }
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(CalcError::RegisterOutOfRange { index, size })?;
        *slot = value;
        Ok(())
    }

    pub fn stat(&self, register: StatRegister) -> f64 {
        self.slots[register.index()]
    }

    /// Current statistics sums
    pub fn stat_sums(&self) -> StatSums {
        StatSums {
            count: self.stat(StatRegister::Count),
            sum_x: self.stat(StatRegister::SumX),
            sum_x2: self.stat(StatRegister::SumX2),
            sum_y: self.stat(StatRegister::SumY),
            sum_y2: self.stat(StatRegister::SumY2),
            sum_xy: self.stat(StatRegister::SumXY),
        }
    }

    /// Write all six statistics registers at once
    pub fn commit_stats(&mut self, sums: &StatSums) {
        self.slots[StatRegister::Count.index()] = sums.count;
        self.slots[StatRegister::SumX.index()] = sums.sum_x;
        self.slots[StatRegister::SumX2.index()] = sums.sum_x2;
        self.slots[StatRegister::SumY.index()] = sums.sum_y;
        self.slots[StatRegister::SumY2.index()] = sums.sum_y2;
        self.slots[StatRegister::SumXY.index()] = sums.sum_xy;
    }

    pub fn clear_stats(&mut self) {
        self.commit_stats(&StatSums::default());
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.slots
    }
}
