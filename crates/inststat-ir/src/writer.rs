//! inststat output writer.
//!
//! The output uses the bbinfo grammar, so it can be loaded back with
//! [`crate::load`]. Skipped blocks are left out and only non-empty cost lines
//! are written.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{BlockStat, FuncStat, Layout, SaveError};

/// Write functions in inststat format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_to<W: Write>(funcs: &[FuncStat], mut out: W) -> io::Result<()> {
    for func in funcs {
        writeln!(out, "func: {}", func.name)?;
        writeln!(out, " at: {}", func.loc())?;
        for block in func.blocks.iter().filter(|b| !b.skip) {
            writeln!(out, " block: {}", block.name)?;
            match func.layout {
                Layout::Line => write_lines(block, &mut out)?,
                Layout::Block => write_span(block, &mut out)?,
            }
        }
    }
    Ok(())
}

fn write_lines<W: Write>(block: &BlockStat, out: &mut W) -> io::Result<()> {
    for (line, stat) in block.lines.iter().filter(|(_, s)| !s.is_empty()) {
        writeln!(out, "  {line}: {stat}")?;
    }
    Ok(())
}

fn write_span<W: Write>(block: &BlockStat, out: &mut W) -> io::Result<()> {
    let (Some(from), Some(to)) = (&block.from, &block.to) else {
        return Ok(());
    };
    writeln!(out, "  size: {}", block.size.unwrap_or_default())?;
    writeln!(out, "  from: {from}")?;
    writeln!(out, "  to: {to}")?;
    if !block.stat.is_empty() {
        writeln!(out, "  stat: {}", block.stat)?;
    }
    Ok(())
}

/// Save functions to `path`.
///
/// The file is written next to its destination and moved into place once
/// complete, so a failed save leaves no partial output.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(funcs: &[FuncStat], path: &Path) -> Result<(), SaveError> {
    let io_err = |source: io::Error| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir).map_err(io_err)?;
    {
        let mut out = BufWriter::new(temp.as_file_mut());
        write_to(funcs, &mut out).map_err(io_err)?;
        out.flush().map_err(io_err)?;
    }
    temp.persist(path).map_err(|e| io_err(e.error))?;

    debug!(path = %path.display(), functions = funcs.len(), "saved inststat");
    Ok(())
}
