//! Reply generation and draft rendering over extracted fields.

mod dispatcher;
mod draft;

pub use dispatcher::{
    DRAFT_OFFER, DRAFT_PREAMBLE, FALLBACK_REPLY, GREETING_REPLY, NOT_ENOUGH_INFO_REPLY,
    REMOTE_UNAVAILABLE_REPLY, ResponseDispatcher, STATUS_REPLY, local_reply,
};
pub use draft::{DRAFT_SEPARATOR, DraftError, draft_timestamp, render_draft};
