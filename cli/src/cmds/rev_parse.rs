use std::io::Write;

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitlayout_on_disk::Repository;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("rev-parse")
        .about("Show where the repository lives")
        .arg(
            Arg::with_name("git-dir")
                .long("git-dir")
                .help("Print the path to the control directory"),
        )
        .arg(
            Arg::with_name("show-toplevel")
                .long("show-toplevel")
                .help("Print the path to the working tree"),
        )
        .arg(
            Arg::with_name("is-bare-repository")
                .long("is-bare-repository")
                .help("Print \"true\" if the repository is bare, else \"false\""),
        )
        .arg(
            Arg::with_name("index-file")
                .long("index-file")
                .help("Print the path to the index file"),
        )
}

// Output is one line per requested item, always in the order the
// options are declared above.
pub(crate) fn run(app: &mut App, rp_matches: &ArgMatches) -> Result<()> {
    let repo = Repository::open(&app.hints())?;

    if rp_matches.is_present("git-dir") {
        writeln!(app, "{}", repo.directory().display())?;
    }

    if rp_matches.is_present("show-toplevel") {
        writeln!(app, "{}", repo.work_tree()?.display())?;
    }

    if rp_matches.is_present("is-bare-repository") {
        writeln!(app, "{}", repo.is_bare())?;
    }

    if rp_matches.is_present("index-file") {
        writeln!(app, "{}", repo.index_file()?.display())?;
    }

    Ok(())
}
