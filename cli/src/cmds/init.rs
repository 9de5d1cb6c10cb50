use std::{
    env,
    io::Write,
    path::{PathBuf, MAIN_SEPARATOR},
};

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitlayout_on_disk::Repository;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty git repository")
        .arg(
            Arg::with_name("bare")
                .long("bare")
                .help("Create a bare repository"),
        )
        .arg(Arg::with_name("directory").help("The directory to create"))
}

pub(crate) fn run(app: &mut App, init_matches: &ArgMatches) -> Result<()> {
    let mut hints = app.hints();
    let directory = init_matches.value_of_os("directory");

    let repo = if init_matches.is_present("bare") {
        let git_dir: PathBuf = match (directory, hints.explicit_git_dir()) {
            (Some(dir), _) => dir.into(),
            (None, Some(git_dir)) => git_dir.to_path_buf(),
            (None, None) => env::current_dir()?,
        };
        Repository::init_bare(git_dir)?
    } else {
        if let Some(dir) = directory {
            hints = hints.work_tree(dir);
        }
        Repository::init(&hints)?
    };

    writeln!(
        app,
        "Initialized empty Git repository in {}{}",
        repo.directory().display(),
        MAIN_SEPARATOR
    )?;

    Ok(())
}
