//! Headless playback: drives an indicator with a [`crate::VirtualHost`] and renders every
//! redraw it requests.

/// Range and still rendering.
pub mod session;
