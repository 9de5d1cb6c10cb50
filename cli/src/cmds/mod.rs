use crate::{App, Result};

use tracing::debug;

mod init;
mod rev_parse;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(init::subcommand())
        .subcommand(rev_parse::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Ugh. Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    debug!(subcommand = ?matches.subcommand_name(), "dispatching");

    match matches.subcommand() {
        ("init", Some(m)) => init::run(app, &m),
        ("rev-parse", Some(m)) => rev_parse::run(app, &m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}
