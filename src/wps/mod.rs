//! Welding Procedure Specification (WPS) parameter recommendation engine.
//!
//! Given a base material, thickness, welding position and joint geometry, the
//! engine derives process and polarity, filler wire and diameter, shielding
//! gas and flow, preheat/interpass temperatures, a multi-pass plan with
//! current/voltage/travel-speed ranges and heat input per pass, and a list of
//! notes for the welder.
//!
//! # Architecture
//!
//! - **Rules**: Loaded from TOML config (or embedded defaults)
//! - **Material rules**: Family classification, process, filler, gas, temperatures
//! - **Pass plan**: Pass count from joint geometry, then per-pass parameters
//! - **Notes**: Guidance keyed by position, material family and process
//! - **Engine**: Sequences the above and records one reason per decision
//!
//! The engine never fails. A missing material yields an empty recommendation;
//! any other gap leaves the affected fields unset.
//!
//! # Example
//!
//! ```ignore
//! use wps_recommender::wps::{Catalogs, WeldingInputs, WpsEngine};
//!
//! let inputs: WeldingInputs = serde_json::from_str(request_json)?;
//! let engine = WpsEngine::default();
//! inputs.validate(&engine.rules().limits)?;
//!
//! let rec = engine.recommend(&inputs, &catalogs);
//!
//! for pass in rec.pass_plan() {
//!     println!("{}: {:?} A, {:?} V, {} mm/min",
//!         pass.pass_label, pass.current_range_a, pass.voltage_range_v,
//!         pass.travel_speed_mm_min);
//! }
//! ```

mod engine;
pub mod interpolate;
pub mod material;
pub mod notes;
pub mod pass_plan;
pub mod position;
mod recommendation;
mod rules;
mod types;

pub use engine::{generate_wps_recommendation, WpsEngine};
pub use recommendation::*;
pub use rules::{default_rules, load_rules};
pub use types::*;
