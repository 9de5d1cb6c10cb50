use std::io::Write;

#[cfg(test)]
use std::ffi::OsString;

use crate::{cmds, Result};

use clap::{crate_version, AppSettings, Arg, ArgMatches};
use gitlayout_core::layout::ConstructionHints;

pub(crate) fn clap_app<'a, 'b>() -> clap::App<'a, 'b> {
    let app = clap::App::new("gitlayout")
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("git-dir")
                .long("git-dir")
                .value_name("path")
                .env("GIT_DIR")
                .help("Path to the repository's control directory"),
        )
        .arg(
            Arg::with_name("work-tree")
                .long("work-tree")
                .value_name("path")
                .env("GIT_WORK_TREE")
                .help("Path to the working tree"),
        );

    cmds::add_subcommands(app)
}

pub(crate) struct App<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdout: &'a mut dyn Write,
}

impl<'a> App<'a> {
    pub fn run(&mut self) -> Result<()> {
        cmds::dispatch(self)
    }

    // The repository location given by `--git-dir` and `--work-tree`
    // (or their environment variables).
    pub fn hints(&self) -> ConstructionHints {
        let mut hints = ConstructionHints::new();

        if let Some(git_dir) = self.arg_matches.value_of_os("git-dir") {
            hints = hints.git_dir(git_dir);
        }

        if let Some(work_tree) = self.arg_matches.value_of_os("work-tree") {
            hints = hints.work_tree(work_tree);
        }

        hints
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
        args.insert(0, OsString::from("gitlayout"));

        let mut stdout = Vec::new();

        App {
            arg_matches: clap_app().get_matches_from_safe(args)?,
            stdout: &mut stdout,
        }
        .run()?;

        Ok(stdout)
    }
}

impl<'a> Write for App<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}
