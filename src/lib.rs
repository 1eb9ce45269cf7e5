//! Receiptshare - Main Library
//!
//! Receiptshare is a receipt-sharing backend built with Rust and Axum.
//! Users register and log in with username/password credentials, receive a
//! signed, time-limited access token, and use it to upload receipts, like
//! them, and delete their own.
//!
//! # Overview
//!
//! This library provides the core functionality for Receiptshare, including:
//! - Credential-based identity (registration, login, bcrypt password storage)
//! - Stateless JWT session tokens with issuer/audience/expiry validation
//! - A bearer-token guard protecting every mutating route
//! - Ownership enforcement (only a receipt's creator may delete it)
//! - Receipt upload/serving, like toggling, search, and user queries

/// Server-side code: HTTP handlers, authentication, storage.
pub mod backend;
