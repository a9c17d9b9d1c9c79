/// The indicator object a host view embeds.
pub mod view;
