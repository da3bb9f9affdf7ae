//! Progress reporting for long grid scans.

/// Receives completion fractions in `[0, 1]` during a scan.
pub trait Progress {
    /// Reports that `fraction` of the work is done.
    fn report(&mut self, fraction: f64);

    /// Called once after the scan completes.
    fn finished(&mut self) {}
}

/// Discards all progress reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _fraction: f64) {}
}

impl<F: FnMut(f64)> Progress for F {
    fn report(&mut self, fraction: f64) {
        self(fraction)
    }
}
