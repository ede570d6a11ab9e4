//! Verification service module for email address ownership
//!
//! This module provides the one-time code workflow:
//! - Code generation and per-address storage
//! - Delivery through the email collaborator
//! - Verification with lazy expiry
//! - Periodic sweep of expired records

mod config;
mod service;
mod sweeper;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use service::OtpService;
pub use sweeper::{OtpSweeper, SweepResult};
pub use traits::{Clock, EmailDeliveryTrait, ManualClock, SystemClock};
pub use types::{SendCodeResult, VerifyCodeResult};
