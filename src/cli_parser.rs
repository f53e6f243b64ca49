use clap::Parser;
use indoc::indoc;

const LONG_ABOUT: &str = indoc! {"
    Two-pass assembler for the 12-bit-word instruction set.

    Each <base> names a source file <base>.as (extension omitted on the
    command line). A successful file writes <base>.ob, and <base>.ent /
    <base>.ext when the file declared at least one entry / extern use site.
    A file with any diagnostic writes none of these.
"};

#[derive(Parser)]
#[clap(author, version, about, long_about = LONG_ABOUT)]
pub struct CliParser {
    /// Base names to assemble, e.g. `prog` for `prog.as`.
    #[clap(required = true)]
    pub bases: Vec<String>,

    /// Print a banner before assembling each file.
    #[clap(short = 'v', long = "verbose", action)]
    pub verbose: bool,

    /// Persist the macro-expanded source as `<base>.am`.
    #[clap(long = "keep-expanded", action)]
    pub keep_expanded: bool,
}
