//! Human-readable catalog dump, for debugging only
//!
//! The layout is not a stability contract.

use crate::catalog::Catalog;
use sil_core::{GroupingEntry, Handle, MemberSet, RegionEntry};
use std::fmt::{self, Write};

/// Caller-supplied annotations appended to dump lines
///
/// Regions and groupings are indexed by handle, matrices by position in the
/// matrix store. Missing entries are simply not printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DumpAnnotations<'a> {
    /// Per region handle
    pub regions: &'a [String],
    /// Per grouping handle
    pub groupings: &'a [String],
    /// Per matrix
    pub matrices: &'a [String],
}

fn annotation(notes: &[String], idx: usize) -> &str {
    notes.get(idx).map_or("", String::as_str)
}

fn write_note<W: Write>(out: &mut W, note: &str) -> fmt::Result {
    if note.is_empty() {
        writeln!(out)
    } else {
        writeln!(out, "  # {}", note)
    }
}

fn write_handles<W: Write>(out: &mut W, handles: &[Handle]) -> fmt::Result {
    write!(out, "[")?;
    for (i, h) in handles.iter().enumerate() {
        if i > 0 {
            write!(out, ", ")?;
        }
        write!(out, "{}", h)?;
    }
    write!(out, "]")
}

fn write_members<W: Write>(out: &mut W, members: &MemberSet, limit: usize) -> fmt::Result {
    let shown: Vec<Handle> = members.iter().take(limit).collect();
    write_handles(out, &shown)?;
    if members.len() > shown.len() {
        write!(out, " (+{} more)", members.len() - shown.len())?;
    }
    Ok(())
}

impl Catalog {
    /// Write every region, grouping and matrix to `out`
    pub fn dump<W: Write>(&self, out: &mut W, notes: &DumpAnnotations<'_>) -> fmt::Result {
        let limit = self.config().dump_member_limit;
        writeln!(
            out,
            "Catalog: {} regions, {} groupings",
            self.num_regions(),
            self.num_groupings()
        )?;

        writeln!(out, "Regions:")?;
        for (span, entry) in self.region_table().spans() {
            match entry.kind {
                RegionEntry::Whole | RegionEntry::Subset => {
                    let region = &self.stored_regions()[entry.local_index];
                    let kind = if entry.kind == RegionEntry::Whole {
                        "whole"
                    } else {
                        "subset"
                    };
                    write!(out, "  {:>5} {} {} in=", span.start, kind, region)?;
                    write_handles(out, region.maps_in())?;
                    write!(out, " out=")?;
                    write_handles(out, region.maps_out())?;
                    if !region.matrix_maps_out().is_empty() {
                        write!(out, " matrix-out=")?;
                        write_handles(out, region.matrix_maps_out())?;
                    }
                    write_note(out, annotation(notes.regions, span.start))?;
                }
                RegionEntry::ArrayGroup => {
                    let group = &self.array_groups()[entry.local_index];
                    write!(
                        out,
                        "  {:>5} array group {} ({} regions, parent {})",
                        format!("{}..{}", span.start, span.end),
                        entry.local_index,
                        group.count(),
                        group.parent()
                    )?;
                    if group.count() > 0 {
                        write!(
                            out,
                            " {}..{}",
                            group.region_name(0),
                            group.region_name(group.count() - 1)
                        )?;
                    }
                    write_note(out, annotation(notes.regions, span.start))?;
                }
                RegionEntry::Matrix => {
                    writeln!(
                        out,
                        "  {:>5} matrix {} cells",
                        format!("{}..{}", span.start, span.end),
                        entry.local_index
                    )?;
                }
            }
        }

        writeln!(out, "Groupings:")?;
        for (span, entry) in self.grouping_table().spans() {
            match entry.kind {
                GroupingEntry::Stored => {
                    let grouping = &self.stored_groupings()[entry.local_index];
                    write!(
                        out,
                        "  {:>5} {} ({}) over {} members=",
                        span.start,
                        grouping.category(),
                        grouping.role(),
                        grouping.superset()
                    )?;
                    write_members(out, grouping.members(), limit)?;
                    write_note(out, annotation(notes.groupings, span.start))?;
                }
                GroupingEntry::ArrayGroup => {
                    let group = &self.array_groups()[entry.local_index];
                    write!(
                        out,
                        "  {:>5} {} ({}) over {} members={}..{} [array group {}]",
                        span.start,
                        group.category(),
                        group.role(),
                        group.parent(),
                        group.first_region(),
                        group.first_region() + group.count(),
                        entry.local_index
                    )?;
                    write_note(out, annotation(notes.groupings, span.start))?;
                }
                GroupingEntry::Matrix => {
                    writeln!(
                        out,
                        "  {:>5} matrix {} rows and columns",
                        format!("{}..{}", span.start, span.end),
                        entry.local_index
                    )?;
                }
            }
        }

        if !self.matrices().is_empty() {
            writeln!(out, "Matrices:")?;
            for (idx, matrix) in self.matrices().iter().enumerate() {
                write!(out, "  {:>5} rows=", idx)?;
                write_handles(out, matrix.rows())?;
                write!(out, " ({}) columns=", matrix.row_category())?;
                write_handles(out, matrix.columns())?;
                write!(
                    out,
                    " ({}) cells from {} groupings from {}",
                    matrix.column_category(),
                    matrix.first_region(),
                    matrix.first_grouping()
                )?;
                write_note(out, annotation(notes.matrices, idx))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, &DumpAnnotations::default())
    }
}
