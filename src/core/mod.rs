//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Language classification by extension
//! - Comment rules per language family
//! - Text/binary file reading
//! - The scan and estimate data model
//! - Rendering functions for different output formats
//! - Path normalization utilities

pub mod comments;
pub mod error;
pub mod file_reader;
pub mod languages;
pub mod model;
pub mod paths;
pub mod render;
