//! Search statistics and performance metrics

use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Main-search nodes
    pub nodes: u64,

    /// Quiescence nodes
    pub qsearch_nodes: u64,

    /// Fail-high cutoffs in the main search
    pub beta_cutoffs: u64,

    pub null_move_cutoffs: u64,

    /// Reduced-depth probes tried by late move reduction
    pub lmr_probes: u64,

    /// Full-depth re-searches after a null-window probe beat alpha
    pub pvs_researches: u64,

    /// Iterations re-run with a full window
    pub aspiration_failures: u64,

    pub start_time: Option<Instant>,
    pub search_time: Duration,
    pub nps: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Refresh elapsed time and nodes per second
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.total_nodes() * 1000) / elapsed_ms;
            }
        }
    }

    #[inline]
    pub fn total_nodes(&self) -> u64 {
        self.nodes + self.qsearch_nodes
    }

    #[inline]
    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    #[inline]
    pub fn inc_qsearch_node(&mut self) {
        self.qsearch_nodes += 1;
    }

    #[inline]
    pub fn inc_beta_cutoff(&mut self) {
        self.beta_cutoffs += 1;
    }

    #[inline]
    pub fn inc_null_move_cutoff(&mut self) {
        self.null_move_cutoffs += 1;
    }

    #[inline]
    pub fn inc_lmr_probe(&mut self) {
        self.lmr_probes += 1;
    }

    #[inline]
    pub fn inc_pvs_research(&mut self) {
        self.pvs_researches += 1;
    }

    pub fn inc_aspiration_failure(&mut self) {
        self.aspiration_failures += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Emit the summary as one structured event
    pub fn log_summary(&self) {
        debug!(
            nodes = self.nodes,
            qsearch_nodes = self.qsearch_nodes,
            beta_cutoffs = self.beta_cutoffs,
            null_move_cutoffs = self.null_move_cutoffs,
            lmr_probes = self.lmr_probes,
            pvs_researches = self.pvs_researches,
            aspiration_failures = self.aspiration_failures,
            time_ms = self.search_time.as_millis() as u64,
            nps = self.nps,
            "search finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_counters() {
        let mut stats = SearchStats::new();
        stats.start_timing();
        stats.inc_node();
        stats.inc_qsearch_node();
        stats.inc_beta_cutoff();
        assert_eq!(stats.total_nodes(), 2);
        stats.reset();
        assert_eq!(stats.total_nodes(), 0);
        assert!(stats.start_time.is_none());
    }
}
