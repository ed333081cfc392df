use miette::Result;

use depcheck_core::component::ComponentRef;
use depcheck_resolver::conflict::conflicts_directly;
use depcheck_util::errors::DepcheckError;

use crate::session::Session;

pub fn exec(session: &Session, a: &str, b: &str, direct: bool) -> Result<()> {
    let a = parse_known(session, a)?;
    let b = parse_known(session, b)?;

    let clash = if direct {
        conflicts_directly(session.manager.catalog(), &a, &b)
    } else {
        session.manager.conflicts(&a, &b)
    };

    if clash {
        println!("{a} conflicts with {b}");
    } else {
        println!("{a} is compatible with {b}");
    }
    Ok(())
}

fn parse_known(session: &Session, raw: &str) -> Result<ComponentRef> {
    let component = ComponentRef::parse(raw).ok_or_else(|| DepcheckError::Generic {
        message: format!("Invalid component '{raw}', expected <era|scenario|mod>:<id>"),
    })?;
    if !session.manager.catalog().contains(&component) {
        return Err(DepcheckError::UnknownComponent {
            kind: component.kind.to_string(),
            id: component.id,
        }
        .into());
    }
    Ok(component)
}
