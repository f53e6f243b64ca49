//! The ambient filesystem shell around the translation core: for each
//! `<base>` argument, reads `<base>.as`, runs [`translate`], and writes
//! the artefacts described in the object-file format. Per-file failures
//! (I/O errors, an over-long base name) are reported and do not stop
//! the driver from moving on to the next base.

use std::fs;
use std::path::Path;

use asmc::error;
use asmc::translate;

const MAX_BASE_LEN: usize = 255;

/// Assembles one `<base>` argument. Returns whether the file produced
/// an object artefact (used only for the caller's own bookkeeping --
/// per §6.5 per-file success never affects the process exit code).
pub fn assemble_base(base: &str, verbose: bool, keep_expanded: bool) -> bool {
    if base.len() > MAX_BASE_LEN {
        error::print_driver_error(&format!(
            "Base file name \"{base}\" exceeds the maximum of {MAX_BASE_LEN} characters."
        ));
        return false;
    }

    let source_path = format!("{base}.as");
    if verbose {
        println!("Assembling {source_path}");
    }

    let source = match fs::read_to_string(&source_path) {
        Ok(text) => text,
        Err(err) => {
            error::print_driver_error(&format!("Could not read \"{source_path}\": {err}"));
            return false;
        }
    };

    if Path::new(&source_path).extension().and_then(|e| e.to_str()) != Some("as") {
        error::print_warning("The input file extension is not \".as\".");
    }

    let lines: Vec<String> = source.lines().map(|l| l.to_string()).collect();
    let result = translate::translate(&lines);
    result.diagnostics.print_all();

    if keep_expanded {
        if let Err(err) = fs::write(format!("{base}.am"), join_lines(&result.expanded_lines)) {
            error::print_driver_error(&format!("Could not write \"{base}.am\": {err}"));
        }
    }

    if !result.succeeded() {
        return false;
    }

    let object_text = result.object.expect("successful translation always yields an object");
    if let Err(err) = fs::write(format!("{base}.ob"), object_text) {
        error::print_driver_error(&format!("Could not write \"{base}.ob\": {err}"));
        return false;
    }

    if let Some(entries) = result.entries {
        if let Err(err) = fs::write(format!("{base}.ent"), entries) {
            error::print_driver_error(&format!("Could not write \"{base}.ent\": {err}"));
        }
    }

    if let Some(externs) = result.externs {
        if let Err(err) = fs::write(format!("{base}.ext"), externs) {
            error::print_driver_error(&format!("Could not write \"{base}.ext\": {err}"));
        }
    }

    true
}

fn join_lines(lines: &[String]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
