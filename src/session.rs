//! # Watch Session
//!
//! Drives the engine from a live stream of contexts, one JSON object per
//! line. A reader thread parses input; the calling thread owns the
//! [`Debouncer`] and evaluates a context only once it has settled.
//!
//! Malformed lines are logged and skipped, never fatal. At end of input the
//! last pending context is evaluated immediately, so the final state is
//! always rendered.

use crate::context::DriveContext;
use crate::debounce::{Debouncer, Ticket};
use crate::playlist::PlaylistGenerator;
use crate::report;
use anyhow::Result;
use log::{debug, error, info, warn};
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Parse one input line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns the JSON error for lines that are not a context object.
pub fn parse_line(line: &str) -> Result<Option<DriveContext>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Spawn a thread forwarding every parsed context from `reader`.
///
/// The channel disconnects when input ends or fails.
pub fn spawn_reader<R>(reader: R) -> Receiver<DriveContext>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (number, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to read context input: {e}");
                    break;
                }
            };

            match parse_line(&line) {
                Ok(Some(context)) => {
                    if tx.send(context).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("Skipping line {}: {e}", number + 1),
            }
        }
        debug!("Context input finished");
    });

    rx
}

/// Evaluate settled contexts from `reader` until it ends, writing each
/// result to `out`. Returns how many evaluations were rendered.
///
/// # Errors
///
/// Fails only when writing to `out` fails.
pub fn watch<R>(reader: R, out: &mut dyn Write, generator: &PlaylistGenerator<'_>, window: Duration) -> Result<usize>
where
    R: BufRead + Send + 'static,
{
    let rx = spawn_reader(reader);
    let mut debouncer = Debouncer::new(window);
    let mut evaluated = 0;

    info!("Watching for contexts (settling window {} ms)", window.as_millis());

    loop {
        let message = match debouncer.deadline() {
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        let settled = match message {
            Ok(context) => {
                let ticket = debouncer.submit(context, Instant::now());
                debug!("Received {context} as {ticket:?}");
                info!("{}", debouncer.status().label());
                None
            }
            Err(RecvTimeoutError::Timeout) => debouncer.poll(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                if let Some((ticket, context)) = debouncer.flush() {
                    evaluated += settle(out, generator, &debouncer, ticket, &context)?;
                }
                break;
            }
        };

        if let Some((ticket, context)) = settled {
            evaluated += settle(out, generator, &debouncer, ticket, &context)?;
        }
    }

    Ok(evaluated)
}

/// Render `context` unless a newer submission has superseded `ticket`.
/// Returns how many evaluations were written.
fn settle(
    out: &mut dyn Write,
    generator: &PlaylistGenerator<'_>,
    debouncer: &Debouncer<DriveContext>,
    ticket: Ticket,
    context: &DriveContext,
) -> Result<usize> {
    if !debouncer.is_current(ticket) {
        debug!("Discarding stale result for {ticket:?}");
        return Ok(0);
    }

    render(out, generator, context)?;
    info!("{}", debouncer.status().label());
    Ok(1)
}

fn render(out: &mut dyn Write, generator: &PlaylistGenerator<'_>, context: &DriveContext) -> Result<()> {
    let playlist = generator.generate(context);
    report::write_debugger(out, context, &playlist)?;
    report::write_playlist(out, &playlist)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
