//! # IO Module
//!
//! The interface layer that exposes the backend to clients. Currently a
//! single REST surface; the domain layer underneath is transport-agnostic.

pub mod rest;
