use miette::Result;

use depcheck_util::progress::status_info;

use crate::session::Session;

pub fn exec(session: &mut Session, id: &str, force: bool) -> Result<()> {
    session.apply(|m, ui| m.try_scenario(id, force, ui))?;
    if force {
        status_info("Forced", "scenario assigned without dependency checks");
    }
    super::print_selection(session);
    Ok(())
}
