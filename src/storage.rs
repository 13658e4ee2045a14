//! Session Persistence
//!
//! The signed-in session lives in `localStorage` under `user` so a reload
//! keeps the user signed in.

use portal_core::Session;
use tracing::{debug, warn};
use web_sys::Storage;

const SESSION_KEY: &str = "user";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Stored session, if one exists and is still usable
pub fn load_session() -> Option<Session> {
    let raw = local_storage()?.get_item(SESSION_KEY).ok().flatten()?;
    match serde_json::from_str::<Session>(&raw) {
        Ok(session) if session.is_usable() => {
            debug!(user_id = %session.user_id, "restored session");
            Some(session)
        }
        Ok(_) => {
            warn!("stored session has no token, discarding");
            clear_session();
            None
        }
        Err(e) => {
            warn!(error = %e, "stored session is unreadable, discarding");
            clear_session();
            None
        }
    }
}

pub fn save_session(session: &Session) {
    let Some(storage) = local_storage() else {
        warn!("localStorage unavailable, session will not survive a reload");
        return;
    };
    match serde_json::to_string(session) {
        Ok(raw) => {
            if storage.set_item(SESSION_KEY, &raw).is_err() {
                warn!("failed to persist session");
            }
        }
        Err(e) => warn!(error = %e, "failed to encode session"),
    }
}

pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
