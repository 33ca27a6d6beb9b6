#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Drives a [`LifeGrid`](life_grid::LifeGrid) for an interactive window:
//! sizing the grid to the viewport, ticking it on a timer, painting cells from
//! pointer drags and keeping an RGBA raster in step with the cell ages.
//!
//! Nothing here talks to a window system. A host forwards resize, pointer,
//! command and timer events to [`Controller`] and presents [`Controller::raster`].

pub mod color;
pub mod config;
pub mod controller;
pub mod dimensions;
pub mod input;
pub mod render;
pub mod scheduler;

pub use color::{ColorMode, Rgba};
pub use config::LifeConfig;
pub use controller::Controller;
pub use input::PointerPos;
