//! Marketplace backend core.
//!
//! The crate is organised hexagonally: [`domain`] holds entities, the
//! service layer, and the ports it is written against; [`outbound`] holds
//! concrete adapters for those ports. Transport layers (HTTP, CLI) are
//! deliberately absent — they consume the driving ports in
//! [`domain::ports`] and live in the composition root.

pub mod domain;
pub mod observability;
pub mod outbound;
