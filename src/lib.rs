//! Annual Leave Engine for Korean labour law
//!
//! This crate computes statutory annual paid leave under the Labor Standards
//! Act, Article 60: first-year monthly grants, the annual entitlement with its
//! seniority bonus, and the allocation of used days across open accrual
//! buckets. Every calculation produces an audit trace naming the clause it
//! applied. The [`api`] module exposes the engine over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
