//! Glyph atlas placement + codepoint cache for `glyphpack`.
//!
//! This crate only answers:
//! - where a rasterized glyph bitmap lives in a stack of fixed-size pages
//! - how to look it up again by character code
//!
//! A renderer uploads page pixels into textures at whatever cadence it likes;
//! nothing here touches a GPU.
//!
//! # Design goals
//! - fast insertion and lookup; O(1) amortized placement
//! - predictable behavior: append-only growth, no eviction, no repacking
//! - pages are move-only single-owner values; archived pages never change
//!
//! Current approach: a simple row-based shelf packer per page ([`AtlasPage`]),
//! with [`FontAtlas`] rolling over to a fresh page when the active one fills.
//! This is not optimal packing, but it is simple, fast, and deterministic.

#![deny(warnings)]

mod atlas;
mod page;

pub use atlas::*;
pub use page::*;
