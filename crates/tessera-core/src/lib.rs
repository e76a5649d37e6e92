#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Core types for the Tessera layout engine.
//!
//! This crate provides the value types the layout tree is built from:
//! - Lengths: [`Length`], absolute pixels or a fraction of a parent extent
//! - Geometry: [`Size`], [`Margin`], [`BBox`]
//! - Alignment: [`HorizontalAlignment`], [`VerticalAlignment`]
//! - Identity: [`ElementId`], [`LayoutId`]
//! - Errors: [`LayoutError`]

mod alignment;
mod error;
mod geometry;
mod id;
mod length;

pub use alignment::{center_span, HorizontalAlignment, VerticalAlignment};
pub use error::{LayoutError, Result};
pub use geometry::{BBox, Margin, Size};
pub use id::{ElementId, LayoutId};
pub use length::{Length, LengthMode};
