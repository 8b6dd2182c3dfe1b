//! OCR Gateway
//!
//! An HTTP API service in front of an external OCR engine, with a
//! request-gating authentication layer.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                  OCR GATEWAY                   │
//!                    │                                                │
//!   Client Request   │  ┌─────────┐   ┌──────────────┐   ┌─────────┐ │
//!   ─────────────────┼─▶│  http   │──▶│     auth     │──▶│handlers │ │
//!                    │  │ server  │   │   pipeline   │   │/ocr ... │ │
//!                    │  └─────────┘   └──────┬───────┘   └────┬────┘ │
//!                    │                       │                │      │
//!                    │        Strategy B     ▼                ▼      │
//!                    │        ┌──────────────────┐   ┌─────────────┐ │
//!                    │        │ validation       │   │   engine    │ │     External
//!                    │        │ endpoint (HTTP)  │   │   adapter   │─┼───▶ OCR engine
//!                    │        └──────────────────┘   └─────────────┘ │     process
//!                    │                                                │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │           Cross-Cutting Concerns          │ │
//!                    │  │  ┌────────┐  ┌─────────────┐  ┌────────┐ │ │
//!                    │  │  │ config │  │observability│  │request │ │ │
//!                    │  │  │        │  │ logs/metrics│  │  IDs   │ │ │
//!                    │  │  └────────┘  └─────────────┘  └────────┘ │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! The authentication pipeline classifies each caller as local or
//! remote, consults the per-classification policy switches, and, when
//! credentials are required, verifies the bearer token either
//! in-process against a shared secret or by delegating to an external
//! validation service. A process instance runs exactly one of the two
//! strategies.

// Core subsystems
pub mod auth;
pub mod config;
pub mod engine;
pub mod http;

// Cross-cutting concerns
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
