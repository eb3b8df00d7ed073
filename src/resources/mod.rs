//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, tuning and
//! animation definitions.
//!
//! Overview
//! - `animationstore` – definitions for sprite animations reused across entities
//! - `gameconfig` – every gameplay tuning constant, loadable from INI
//! - `input` – raw device samples and the per-frame action state derived from them
//! - `inputscript` – JSON input scripts for headless runs
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod gameconfig;
pub mod input;
pub mod inputscript;
pub mod worldtime;
