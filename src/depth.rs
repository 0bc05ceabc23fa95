use log::info;

#[allow(unused_imports)]
use crate::Rbtree;

/// Depth histogram of leaf slots in a [`Rbtree`] tree, gathered by
/// [`Rbtree::validate`]. A leaf here is an absent child slot, so the
/// maximum depth counts the nodes on the longest path from root.
#[derive(Clone, Debug, Default)]
pub struct Depth {
    samples: usize,
    total: usize,
    histogram: Vec<u64>, // index is depth, item is number of leaf slots.
}

impl Depth {
    pub(crate) fn new() -> Depth {
        Default::default()
    }

    pub(crate) fn sample(&mut self, depth: usize) {
        if depth >= self.histogram.len() {
            self.histogram.resize(depth + 1, 0);
        }
        self.histogram[depth] += 1;
        self.samples += 1;
        self.total += depth;
    }

    /// Return number of leaf slots sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return the depth of the shallowest leaf slot.
    pub fn min(&self) -> usize {
        self.histogram.iter().position(|n| *n > 0).unwrap_or(0)
    }

    /// Return the depth of the deepest leaf slot, which is the height of
    /// the tree.
    pub fn max(&self) -> usize {
        self.histogram.iter().rposition(|n| *n > 0).unwrap_or(0)
    }

    /// Return the average depth of leaf slots, rounded down.
    pub fn mean(&self) -> usize {
        match self.samples {
            0 => 0,
            n => self.total / n,
        }
    }

    /// Return (percentile, depth) tuples for the tail of the histogram.
    /// Only percentiles from 90 and above are reported, each tuple gives
    /// the depth at which the cumulative share of leaf slots crossed it.
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let mut percentiles: Vec<(u8, usize)> = vec![];
        let (mut acc, mut floor) = (0_u64, 90_u8);
        for (depth, n) in self.histogram.iter().enumerate() {
            if *n == 0 {
                continue;
            }
            acc += *n;
            let perc = ((acc as f64 / self.samples as f64) * 100_f64) as u8;
            if perc >= floor {
                percentiles.push((perc, depth));
                floor = perc;
            }
        }
        percentiles
    }

    /// Log depth statistics in human readable format.
    pub fn pretty_print(&self, prefix: &str) {
        info!(
            "{}depth (min, avg, max): {:?}",
            prefix,
            (self.min(), self.mean(), self.max())
        );
        for (perc, depth) in self.percentiles().into_iter() {
            info!("{}  {} percentile = {}", prefix, perc, depth);
        }
    }

    /// Convert depth statistics to JSON-like text, useful for plotting.
    pub fn json(&self) -> String {
        let percentiles: Vec<String> = self
            .percentiles()
            .into_iter()
            .map(|(perc, depth)| format!("{}: {}", perc, depth))
            .collect();
        format!(
            "{{ min: {}, mean: {}, max: {}, percentiles: {{ {} }} }}",
            self.min(),
            self.mean(),
            self.max(),
            percentiles.join(", ")
        )
    }
}
