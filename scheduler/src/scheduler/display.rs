use super::{
    event::{Event, EventKind, Observer},
    stats::{ProcessStats, Summary},
};
use crossterm::{
    queue,
    style::{Color, Print, PrintStyledContent, ResetColor, SetForegroundColor, Stylize},
};
use log::warn;
use std::io::{self, Write};

/// Writes the timeline and statistics to a terminal, colored by event kind.
pub struct TimelinePrinter<W: Write> {
    out: W,
}

impl TimelinePrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TimelinePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn color(kind: EventKind) -> Color {
        match kind {
            EventKind::Enqueue | EventKind::Arrival => Color::Grey,
            EventKind::DispatchCpu => Color::Green,
            EventKind::DispatchIo => Color::Cyan,
            EventKind::Preempted => Color::Yellow,
            EventKind::CpuToIo | EventKind::IoToIo => Color::Magenta,
            EventKind::CpuToReady | EventKind::IoToReady => Color::White,
            EventKind::Finished => Color::Blue,
        }
    }

    pub fn print_event(&mut self, event: &Event) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Self::color(event.event_type)),
            Print(event.timeline_entry()),
            ResetColor,
            Print("\n")
        )?;
        self.out.flush()
    }

    pub fn print_timeline(&mut self, events: &[Event]) -> io::Result<()> {
        for event in events {
            self.print_event(event)?;
        }
        Ok(())
    }

    pub fn print_stats(
        &mut self,
        title: &str,
        stats: &[ProcessStats],
        summary: &Summary,
    ) -> io::Result<()> {
        queue!(
            self.out,
            Print("\n"),
            PrintStyledContent(title.bold().with(Color::Blue)),
            Print("\n"),
            PrintStyledContent(
                format!(
                    "{:>5} | {:>7} | {:>6} | {:>10} | {:>7} | {:>8} | {:>4} | {:>4}\n",
                    "PID", "Arrival", "Finish", "Turnaround", "Waiting", "Response", "CPU", "I/O"
                )
                .bold()
            )
        )?;

        for row in stats {
            queue!(
                self.out,
                SetForegroundColor(Color::Green),
                Print(format!(
                    "{:>5} | {:>7} | {:>6} | {:>10} | {:>7} | {:>8} | {:>4} | {:>4}\n",
                    format!("P{}", row.pid),
                    row.arrival,
                    row.finish,
                    row.turnaround,
                    row.waiting,
                    row.response,
                    row.cpu_time,
                    row.io_time
                )),
                ResetColor
            )?;
        }

        queue!(
            self.out,
            Print(format!(
                "{} processes in {} ticks | avg turnaround {:.2} | avg waiting {:.2} | \
                 avg response {:.2}\n",
                summary.processes,
                summary.makespan,
                summary.avg_turnaround,
                summary.avg_waiting,
                summary.avg_response
            ))
        )?;
        self.out.flush()
    }
}

impl<W: Write> Observer for TimelinePrinter<W> {
    fn on_event(&mut self, event: &Event) {
        if let Err(err) = self.print_event(event) {
            warn!("Failed to print event: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printed_timeline_contains_entries() {
        let event = Event {
            time: 5,
            event: "P2 dispatched to CPU0".to_owned(),
            event_type: EventKind::DispatchCpu,
            process: Some(2),
            device: Some("CPU0".to_owned()),
            ready_queue: vec![],
            wait_queue: vec![],
            cpus: vec![Some(2)],
            ios: vec![],
        };
        let mut printer = TimelinePrinter::new(Vec::new());
        printer.print_timeline(&[event]).unwrap();

        let output = String::from_utf8(printer.into_inner()).unwrap();
        assert!(output.contains("time=5 | P2 dispatched to CPU0"));
    }

    #[test]
    fn test_dispatch_and_finish_colors_differ() {
        type Printer = TimelinePrinter<Vec<u8>>;

        assert_eq!(Printer::color(EventKind::DispatchCpu), Color::Green);
        assert_eq!(Printer::color(EventKind::Finished), Color::Blue);
        assert_ne!(
            Printer::color(EventKind::DispatchCpu),
            Printer::color(EventKind::DispatchIo)
        );
    }
}
