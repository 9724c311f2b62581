//! Merge-time gate for pull request status checks.
//!
//! `gh-gate` runs while a git merge is in progress, resolves the pull request
//! for the incoming branch through the GitHub CLI, evaluates its status-check
//! rollup, and either lets the merge proceed or rolls the repository back to
//! its pre-merge state.
//!
//! The decision engine lives in [`gate::MergeGate`]. Every external data
//! source sits behind a trait seam ([`command::CommandRunner`],
//! [`review::ReviewService`]) so the whole flow is testable without a real
//! checkout or network access.

pub mod cache;
pub mod command;
pub mod error;
pub mod gate;
pub mod membership;
pub mod repo;
pub mod resolve;
pub mod review;
pub mod types;
