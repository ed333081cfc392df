use miette::Result;

use depcheck_util::progress::{status_info, status_warn};

use crate::session::Session;

pub fn exec(session: &mut Session, ids: &[String], force: bool) -> Result<()> {
    session.apply(|m, ui| m.try_modifications(ids, force, ui))?;

    for dropped in &session.manager.last_incompatibilities().incompatibilities {
        status_warn("Dropped", &dropped.to_string());
    }
    if force {
        status_info("Forced", "modifications assigned without dependency checks");
    }
    super::print_selection(session);
    Ok(())
}
