//! The list of employee payouts being prepared for a payroll run.

use paystream_types::{parse_amount, Mist};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionMode {
    #[default]
    Single,
    Multiple,
}

/// One payout row. Address and amount are kept as typed so partially filled rows
/// can be edited; they are validated when the run is submitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollDistribution {
    pub id: u32,
    pub address: String,
    pub amount: String,
}

impl PayrollDistribution {
    pub fn empty(id: u32) -> Self {
        Self {
            id,
            address: String::new(),
            amount: String::new(),
        }
    }
}

/// Editable list of payouts.
///
/// Always holds at least one row. In `Single` mode it holds exactly one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionList {
    mode: DistributionMode,
    entries: Vec<PayrollDistribution>,
}

impl Default for DistributionList {
    fn default() -> Self {
        Self::new()
    }
}

impl DistributionList {
    pub fn new() -> Self {
        Self {
            mode: DistributionMode::Single,
            entries: vec![PayrollDistribution::empty(1)],
        }
    }

    /// Build a list from existing rows, e.g. loaded from a file.
    ///
    /// Rows are renumbered from 1 so ids are unique. An empty input yields one
    /// empty row; more than one row switches to `Multiple`.
    pub fn from_rows(rows: impl IntoIterator<Item = (String, String)>) -> Self {
        let entries: Vec<_> = rows
            .into_iter()
            .zip(1u32..)
            .map(|((address, amount), id)| PayrollDistribution { id, address, amount })
            .collect();
        match entries.len() {
            0 => Self::new(),
            1 => Self {
                mode: DistributionMode::Single,
                entries,
            },
            _ => Self {
                mode: DistributionMode::Multiple,
                entries,
            },
        }
    }

    pub fn mode(&self) -> DistributionMode {
        self.mode
    }

    pub fn entries(&self) -> &[PayrollDistribution] {
        &self.entries
    }

    /// Switching to `Single` discards every row and starts from one empty row.
    pub fn set_mode(&mut self, mode: DistributionMode) {
        if mode == DistributionMode::Single {
            self.entries = vec![PayrollDistribution::empty(1)];
        }
        self.mode = mode;
    }

    /// Append an empty row with id one above the current maximum. Only allowed in
    /// `Multiple` mode.
    pub fn add(&mut self) -> Option<u32> {
        if self.mode != DistributionMode::Multiple {
            return None;
        }
        let id = self.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        self.entries.push(PayrollDistribution::empty(id));
        Some(id)
    }

    /// Remove a row. The last remaining row cannot be removed.
    pub fn remove(&mut self, id: u32) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn update(&mut self, id: u32, address: Option<&str>, amount: Option<&str>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(address) = address {
            entry.address = address.to_string();
        }
        if let Some(amount) = amount {
            entry.amount = amount.to_string();
        }
        true
    }

    /// Sum of all amounts. Rows whose amount does not parse count as zero.
    pub fn total(&self) -> Mist {
        self.entries
            .iter()
            .map(|e| parse_amount(&e.amount).unwrap_or(Mist::ZERO))
            .fold(Mist::ZERO, Mist::saturating_add)
    }

    /// Total with two decimals, as displayed next to the list.
    pub fn total_display(&self) -> String {
        self.total().to_fixed(2)
    }
}
