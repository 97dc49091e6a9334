use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Write one path per line to `dest`, or to `stdout` when no file is given.
///
/// The file is created or truncated. Nothing is written to `stdout` when a
/// file is given.
pub fn write_selection<W: Write>(paths: &[PathBuf], dest: Option<&Path>, stdout: W) -> io::Result<()> {
    match dest {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_lines(&mut out, paths)?;
            out.flush()
        }
        None => {
            let mut out = stdout;
            write_lines(&mut out, paths)?;
            out.flush()
        }
    }
}

fn write_lines<W: Write>(out: &mut W, paths: &[PathBuf]) -> io::Result<()> {
    for path in paths {
        out.write_all(path.as_os_str().as_bytes())?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
