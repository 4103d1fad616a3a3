//! Point-set registration.
//!
//! Aligns two occupied-cell point sets with multi-start ICP and random
//! subsampling.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                     MULTI-START REGISTRATION                       │
//! │                                                                    │
//! │  fixed A, moving B                                                 │
//! │       │                                                            │
//! │       ▼  per epoch                                                 │
//! │  ┌────────────┐   per start angle   ┌─────────────────────────┐    │
//! │  │ Subsample  │ ──────────────────▶ │ ICP: pair → score →     │    │
//! │  │ A and B    │                     │      solve → apply      │    │
//! │  └────────────┘                     └─────────────────────────┘    │
//! │                                              │                     │
//! │                                              ▼                     │
//! │                                  lowest error over all runs        │
//! │                                              │                     │
//! │                                              ▼                     │
//! │                                     RegistrationResult             │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`subsample`] | Random thinning per epoch |
//! | [`find_correspondences`] | Brute-force nearest neighbours |
//! | [`solve_rigid_motion`] | Closed-form rotation and translation |
//! | [`IcpRefiner`] | ICP loop from one start pose |
//! | [`MultiStartIcp`] | Epochs × start rotations, global best |
//!
//! ## Example
//!
//! ```rust,ignore
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use vastu_merge::matching::{MultiStartIcp, RegistrationConfig};
//!
//! let engine = MultiStartIcp::new(RegistrationConfig::default());
//! let result = engine.register(&points_a, &points_b, &mut StdRng::from_os_rng())?;
//!
//! match result.alignment {
//!     Some(a) => println!("{:?} (mse {:.4})", a.transform, a.evaluation),
//!     None => println!("no alignment"),
//! }
//! ```

mod config;
mod correspondence;
mod engine;
mod icp;
mod solver;
mod subsample;
mod traits;
mod types;

pub use config::RegistrationConfig;
pub use correspondence::{CorrespondenceSet, find_correspondences, nearest_index};
pub use engine::MultiStartIcp;
pub use icp::{IcpRefiner, ReferencePair, RefinementOutcome};
pub use solver::{CrossCovariance, RigidMotion, closed_form_rotation, solve_rigid_motion};
pub use subsample::{requested_discard, subsample};
pub use traits::PointSetRegistration;
pub use types::{
    Alignment, AttemptRecord, NO_RESULT_EVALUATION, RegistrationResult, RegistrationStats,
    TransformationMessage,
};
