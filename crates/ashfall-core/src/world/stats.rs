//! Simulation statistics collection trait

/// Trait for collecting simulation statistics
///
/// Lets the core report what happened during a tick without depending
/// on whatever the embedding application does with the numbers.
pub trait SimStats {
    /// Record that a cell was moved during simulation
    fn record_cell_moved(&mut self);

    /// Record that a neighbor reaction fired
    fn record_reaction(&mut self);

    /// Record that a cell's lifetime expired
    fn record_decay(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_cell_moved(&mut self) {}
    fn record_reaction(&mut self) {}
    fn record_decay(&mut self) {}
}
