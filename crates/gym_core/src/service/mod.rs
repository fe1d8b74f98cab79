//! Use-case services and the action dispatch boundary.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI layers decoupled from storage details: they select an
//!   [`actions::AdminAction`] and receive a classified result back.

pub mod actions;
pub mod class_service;
pub mod member_service;
pub mod trainer_service;
