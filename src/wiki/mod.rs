// src/wiki/mod.rs
// =============================================================================
// Knowledge about the shape of wiki article links.
//
// Submodules:
// - validator: decides whether a URL is an article link we accept
// =============================================================================

mod validator;

pub use validator::LinkValidator;
