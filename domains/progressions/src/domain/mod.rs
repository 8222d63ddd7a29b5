//! Progressions domain layer: entities, validation, service

pub mod entities;
pub mod service;
pub mod validation;
