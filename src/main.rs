mod cli_parser;
mod driver;

use clap::Parser;

use crate::cli_parser::CliParser;

fn main() {
    let args = CliParser::parse();

    for base in &args.bases {
        driver::assemble_base(base, args.verbose, args.keep_expanded);
    }
}
