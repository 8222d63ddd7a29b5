//! HTTP handlers for the Progressions domain

pub mod progressions;
