use actix_session::Session;

/// One-shot flash message, consumed on first read.
pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

pub fn set_flash(session: &Session, msg: &str) {
    let _ = session.insert("flash", msg);
}
