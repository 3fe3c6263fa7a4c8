// Components module - the pieces of the carousel screen
//
// Top to bottom:
// - Title bar: Deck title, tagline, attribution
// - Card strip: The scrolling cards
// - Nav bar: Previous/next buttons and the counter
// - Progress bar: Clickable position track
// - Swipe hint: First-run instruction line
// - Status bar: Latest log line, seen cards, theme
//
// Each component is a focused, single-responsibility module.

pub mod card_strip;
pub mod nav_bar;
pub mod progress_bar;
pub mod status_bar;
pub mod swipe_hint;
pub mod title_bar;
