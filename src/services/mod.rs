// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod export;
pub mod normalize;
pub mod peloton;
pub mod workouts;

pub use normalize::normalize;
pub use peloton::{PelotonClient, Session, UpstreamResponse};
