// SPDX-License-Identifier: MIT

//! Middleware modules (trigger authentication, security headers).

pub mod security;
pub mod trigger_auth;

pub use trigger_auth::require_trigger_secret;
