//! Plain-text rendering of evaluation results.

use crate::context::DriveContext;
use crate::playlist::Playlist;
use std::io::{self, Write};

/// The "logic debugger" block: context, rule and active filter.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_debugger(out: &mut dyn Write, context: &DriveContext, playlist: &Playlist<'_>) -> io::Result<()> {
    writeln!(out, "Context: {context}")?;
    writeln!(out, "Rule: {}", playlist.mode())?;
    writeln!(out, "Filter: {} priority", playlist.active_filter())?;
    writeln!(
        out,
        "Matching: {}/{} tracks",
        playlist.matching_len(),
        playlist.len()
    )
}

/// One numbered line per track. Tracks outside the priority group are
/// marked with `~`.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_playlist(out: &mut dyn Write, playlist: &Playlist<'_>) -> io::Result<()> {
    if playlist.is_empty() {
        return writeln!(out, "(no tracks)");
    }

    for (i, track) in playlist.tracks().iter().enumerate() {
        let marker = if i < playlist.matching_len() { ' ' } else { '~' };
        let bpm = track.bpm.map_or_else(|| "  - ".to_string(), |bpm| format!("{bpm:>4}"));
        writeln!(
            out,
            "{marker}{:>3}. {} - {} [{}] {bpm} bpm {}",
            i + 1,
            track.artist,
            track.title,
            track.track_type,
            track.duration_label()
        )?;
    }
    Ok(())
}
