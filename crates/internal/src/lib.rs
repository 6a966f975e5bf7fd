//! Internal utilities for the qcrypt library
//!
//! Constant-time building blocks shared by the higher-level crates. Nothing
//! in here is algorithm-specific; the KEM crates compose these helpers into
//! their comparison and implicit-rejection paths.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod constant_time;
