//! A bouncing yarn ball with a trailing rope, for 2D canvases.
//!
//! `yarnball` simulates a rigid disk that bounces around a box under gravity,
//! gets batted by a pointer, and pays out a length-limited rope as it spins.
//! The crate is the physics core only: the host owns the canvas, feeds in
//! pointer events and timestamps, and draws from [`RenderFrame`].
//!
//! # Features
//!
//! - **Rigid body**: impulse-based wall contacts with restitution and Coulomb friction
//! - **Pointer hits**: approach-speed scaled impulses applied at the surface, with cooldown
//! - **Spool**: wound radius and exit point driven by continuous feed from spin
//! - **Two ropes**: FABRIK rod chain, or a Verlet chain that unwinds off the disk
//! - **Stable stepping**: clamped frame time, fixed sub-steps
//! - **Observable**: Monitor steps via the `StepObserver` trait, or the `log` facade
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! Coordinates are canvas pixels with +y pointing down; time is in seconds.

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod input;
pub mod body;
pub mod collision;
pub mod hit;
pub mod spool;
pub mod rope;
pub mod rod;
pub mod wound;
pub mod clock;
pub mod sim;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec2};
pub use particle::Particle;
pub use constraint::{DistanceConstraint, BoundsConstraint};
pub use input::{InputTracker, PointerEvent};
pub use body::Body;
pub use collision::{Boundary, ContactReport};
pub use hit::{HitDetector, PointerHit};
pub use spool::Spool;
pub use rope::{Rope, RopeContext, RopeSolver};
pub use rod::RodChain;
pub use wound::{WoundChain, wound_path};
pub use clock::FrameClock;
pub use sim::{RenderFrame, Simulation};
pub use config::{SimConfig, WorldConfig, BodyConfig, ContactConfig, HitConfig, SpoolConfig, RopeConfig, RopeKind, StepConfig};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::ConfigError;
