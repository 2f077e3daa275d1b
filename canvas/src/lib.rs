//! Pixel map canvas engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but all of
//! its logic except [`render`] and [`engine::Engine`] is plain Rust and runs
//! natively under test. It owns the viewport (pan/zoom over the 100×100 cell
//! grid), classifies pointer gestures into clicks, pans and rectangle
//! selections, computes owned areas and their highlight borders, and cuts
//! uploaded images into per-cell tiles. The host UI wires DOM events to the
//! engine and acts on the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`viewport`] | Pan/zoom viewport and screen ↔ cell conversions |
//! | [`grid`] | Cells, rectangles and selections |
//! | [`input`] | Interaction modes and the gesture state machine |
//! | [`area`] | Ownership index and owned-area flood fill |
//! | [`border`] | Outer-edge computation for ownership highlights |
//! | [`scene`] | Display list built from engine state |
//! | [`render`] | Replays the display list onto a 2D context |
//! | [`tiles`] | Upload validation and per-cell image tiling |
//! | [`update`] | Ownership check and per-cell submission |
//! | [`consts`] | Shared numeric constants (grid size, zoom limits, thresholds) |

pub mod area;
pub mod border;
pub mod consts;
pub mod engine;
pub mod grid;
pub mod input;
pub mod render;
pub mod scene;
pub mod tiles;
pub mod update;
pub mod viewport;
