//! Drift-corrected stack alignment and accumulation.
//!
//! Aligns a temporal stack of 2-D images that drift from frame to frame
//! (fast successive scans of the same sample) and produces a single
//! drift-corrected, summed image. Each frame is registered against the
//! previous one and the per-step shifts are chained into absolute shifts
//! relative to frame 0, so large cumulative drift is tracked even though a
//! single pairwise estimate only resolves a bounded displacement.

pub mod align;
pub mod consts;
pub mod error;
pub mod filters;
pub mod fourier;
pub mod frame;
pub mod pipeline;
