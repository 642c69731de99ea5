//! The weight vector driving a [`HeuristicAgent`](crate::heuristic_agent::HeuristicAgent).
//!
//! A [`Genome`] holds 7 named integer genes, each in `[GENE_MIN, GENE_MAX]`. Every
//! constructor and setter clamps into that range, so no code path can produce an
//! out-of-range gene.
//!
//! | Gene         | Used by                                                  |
//! |--------------|----------------------------------------------------------|
//! | `win`        | immediate-win tier (tiers short-circuit, weight unused)  |
//! | `block`      | immediate-block tier (tiers short-circuit, weight unused)|
//! | `center`     | positional bonus for cell 4                              |
//! | `corner`     | positional bonus for cells 0, 2, 6, 8                    |
//! | `side`       | positional bonus for cells 1, 3, 5, 7                    |
//! | `fork`       | own threats created, plus double-threat premium          |
//! | `block_fork` | bonus when the opponent's threat count drops             |
//!
//! # Serialization
//!
//! A genome serializes as an ordered mapping in the table order above. Deserialization
//! accepts any number per gene, truncates it toward zero and clamps it into range.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of genes in a genome.
pub const GENE_COUNT: usize = 7;

/// Smallest value a gene can hold.
pub const GENE_MIN: u8 = 0;

/// Largest value a gene can hold.
pub const GENE_MAX: u8 = 10;

/// Identifies one gene of a [`Genome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum Gene {
    #[display("win")]
    Win,
    #[display("block")]
    Block,
    #[display("center")]
    Center,
    #[display("corner")]
    Corner,
    #[display("side")]
    Side,
    #[display("fork")]
    Fork,
    #[display("block_fork")]
    BlockFork,
}

impl Gene {
    /// All genes in canonical order.
    pub const ALL: [Self; GENE_COUNT] = [
        Self::Win,
        Self::Block,
        Self::Center,
        Self::Corner,
        Self::Side,
        Self::Fork,
        Self::BlockFork,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Block => "block",
            Self::Center => "center",
            Self::Corner => "corner",
            Self::Side => "side",
            Self::Fork => "fork",
            Self::BlockFork => "block_fork",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|gene| gene.name() == name)
    }
}

/// Errors building a [`Genome`] from a named mapping.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenomeError {
    #[display("unknown gene `{name}`")]
    UnknownGene { name: String },
    #[display("gene `{gene}` is missing")]
    MissingGene { gene: Gene },
}

/// A candidate strategy: 7 integer weights in `[GENE_MIN, GENE_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawGenome")]
pub struct Genome {
    win: u8,
    block: u8,
    center: u8,
    corner: u8,
    side: u8,
    fork: u8,
    block_fork: u8,
}

impl Default for Genome {
    fn default() -> Self {
        Self::DEFAULT_PRESET
    }
}

impl Genome {
    /// Hand-tuned genome for immediate play before any training.
    pub const DEFAULT_PRESET: Self = Self {
        win: 9,
        block: 9,
        center: 5,
        corner: 3,
        side: 1,
        fork: 4,
        block_fork: 3,
    };

    /// Creates a genome from values in [`Gene::ALL`] order, clamping each into range.
    #[must_use]
    pub fn from_values(values: [i32; GENE_COUNT]) -> Self {
        let mut genome = Self::DEFAULT_PRESET;
        for (gene, value) in Gene::ALL.into_iter().zip(values) {
            genome.set(gene, value);
        }
        genome
    }

    /// Creates a genome from `(name, value)` pairs.
    ///
    /// Every gene must appear; values are clamped into range. A name appearing twice
    /// keeps the last value.
    pub fn from_named<I, K>(pairs: I) -> Result<Self, GenomeError>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let mut values = [None; GENE_COUNT];
        for (name, value) in pairs {
            let name = name.as_ref();
            let gene = Gene::from_name(name).ok_or_else(|| GenomeError::UnknownGene {
                name: name.to_owned(),
            })?;
            values[gene as usize] = Some(clamp_gene(value));
        }
        let mut genome = Self::DEFAULT_PRESET;
        for (gene, value) in Gene::ALL.into_iter().zip(values) {
            let value = value.ok_or(GenomeError::MissingGene { gene })?;
            *genome.slot_mut(gene) = value;
        }
        Ok(genome)
    }

    /// Returns the value of `gene`.
    #[must_use]
    pub const fn get(&self, gene: Gene) -> u8 {
        match gene {
            Gene::Win => self.win,
            Gene::Block => self.block,
            Gene::Center => self.center,
            Gene::Corner => self.corner,
            Gene::Side => self.side,
            Gene::Fork => self.fork,
            Gene::BlockFork => self.block_fork,
        }
    }

    /// Sets `gene` to `value`, clamped into `[GENE_MIN, GENE_MAX]`.
    pub fn set(&mut self, gene: Gene, value: i32) {
        *self.slot_mut(gene) = clamp_gene(value.into());
    }

    /// Returns all gene values in [`Gene::ALL`] order.
    #[must_use]
    pub fn values(&self) -> [u8; GENE_COUNT] {
        Gene::ALL.map(|gene| self.get(gene))
    }

    /// Iterates over `(gene, value)` pairs in [`Gene::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Gene, u8)> + '_ {
        Gene::ALL.into_iter().map(|gene| (gene, self.get(gene)))
    }

    fn slot_mut(&mut self, gene: Gene) -> &mut u8 {
        match gene {
            Gene::Win => &mut self.win,
            Gene::Block => &mut self.block,
            Gene::Center => &mut self.center,
            Gene::Corner => &mut self.corner,
            Gene::Side => &mut self.side,
            Gene::Fork => &mut self.fork,
            Gene::BlockFork => &mut self.block_fork,
        }
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (gene, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{gene}={value}")?;
        }
        Ok(())
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_gene(value: i64) -> u8 {
    value.clamp(i64::from(GENE_MIN), i64::from(GENE_MAX)) as u8
}

// Accepts any JSON number so externally edited files coerce instead of failing.
#[derive(Deserialize)]
struct RawGenome {
    win: f64,
    block: f64,
    center: f64,
    corner: f64,
    side: f64,
    fork: f64,
    block_fork: f64,
}

impl From<RawGenome> for Genome {
    #[expect(clippy::cast_possible_truncation)]
    fn from(raw: RawGenome) -> Self {
        let coerce = |value: f64| clamp_gene(value.trunc() as i64);
        Self {
            win: coerce(raw.win),
            block: coerce(raw.block),
            center: coerce(raw.center),
            corner: coerce(raw.corner),
            side: coerce(raw.side),
            fork: coerce(raw.fork),
            block_fork: coerce(raw.block_fork),
        }
    }
}
