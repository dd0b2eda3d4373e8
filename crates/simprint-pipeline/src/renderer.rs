use crate::error::PipelineError;
use crate::report::MatchReport;

/// Exposed external interface. No HTML templating is provided — that is
/// explicitly out of scope; this trait only delivers the core's match
/// data to whatever presentation layer the caller supplies.
pub trait Renderer: Send + Sync {
    fn render(&self, report: &MatchReport) -> Result<(), PipelineError>;
}

/// Default renderer: one JSON object per report, written to the given
/// sink. The ambient serialization choice throughout this workspace.
pub struct JsonRenderer<W> {
    sink: parking_lot::Mutex<W>,
}

impl<W: std::io::Write + Send> JsonRenderer<W> {
    pub fn new(sink: W) -> Self {
        JsonRenderer {
            sink: parking_lot::Mutex::new(sink),
        }
    }
}

impl<W: std::io::Write + Send> Renderer for JsonRenderer<W> {
    fn render(&self, report: &MatchReport) -> Result<(), PipelineError> {
        let line = serde_json::to_string(report).map_err(|e| PipelineError::Render(e.to_string()))?;
        let mut sink = self.sink.lock();
        writeln!(sink, "{line}").map_err(|e| PipelineError::Render(e.to_string()))
    }
}

/// Plain-text fragment dump, reworked from
/// `original_source/compare50/html_renderer/renderer.py`'s
/// `render_file_terminal` without pygments or ANSI coloring (presentation
/// styling is explicitly out of scope) — matched fragments are bracketed
/// with their group id instead of colorized.
pub struct TerminalRenderer<W> {
    sink: parking_lot::Mutex<W>,
}

impl<W: std::io::Write + Send> TerminalRenderer<W> {
    pub fn new(sink: W) -> Self {
        TerminalRenderer {
            sink: parking_lot::Mutex::new(sink),
        }
    }

    fn write_submission(&self, sink: &mut W, label: &str, side: &crate::report::SubmissionReport) -> std::io::Result<()> {
        writeln!(sink, "== {label} (submission {}) ==", side.submission_id)?;
        for file in &side.files {
            writeln!(sink, "-- file {} --", file.file_id)?;
            for fragment in &file.fragments {
                if fragment.active_groups.is_empty() {
                    write!(sink, "{}", fragment.text)?;
                } else {
                    let groups: Vec<String> = fragment.active_groups.iter().map(|g| g.to_string()).collect();
                    write!(sink, "[{}:{}]", groups.join(","), fragment.text)?;
                }
            }
            writeln!(sink)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write + Send> Renderer for TerminalRenderer<W> {
    fn render(&self, report: &MatchReport) -> Result<(), PipelineError> {
        let mut sink = self.sink.lock();
        writeln!(sink, "pair ({}, {}) score={}", report.sid1, report.sid2, report.score)
            .map_err(|e| PipelineError::Render(e.to_string()))?;
        self.write_submission(&mut sink, "A", &report.side_a)
            .map_err(|e| PipelineError::Render(e.to_string()))?;
        self.write_submission(&mut sink, "B", &report.side_b)
            .map_err(|e| PipelineError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FileReport, FragmentView, SpanGroup, SubmissionReport};
    use simprint_span::{FileId, SubmissionId};
    use std::collections::BTreeSet;

    fn sample_report() -> MatchReport {
        MatchReport {
            sid1: SubmissionId(1),
            sid2: SubmissionId(2),
            score: 3,
            side_a: SubmissionReport {
                submission_id: SubmissionId(1),
                files: vec![FileReport {
                    file_id: FileId(10),
                    fragments: vec![FragmentView {
                        text: "abc".into(),
                        active_groups: BTreeSet::from([0]),
                    }],
                }],
            },
            side_b: SubmissionReport {
                submission_id: SubmissionId(2),
                files: vec![FileReport {
                    file_id: FileId(20),
                    fragments: vec![FragmentView {
                        text: "abc".into(),
                        active_groups: BTreeSet::from([0]),
                    }],
                }],
            },
            span_groups: vec![SpanGroup { group_id: 0, hash: 294 }],
        }
    }

    #[test]
    fn json_renderer_emits_one_line_per_report() {
        let buf: Vec<u8> = Vec::new();
        let renderer = JsonRenderer::new(buf);
        renderer.render(&sample_report()).unwrap();
        let out = renderer.sink.lock();
        let text = String::from_utf8(out.clone()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"score\":3"));
    }

    #[test]
    fn terminal_renderer_brackets_active_groups() {
        let buf: Vec<u8> = Vec::new();
        let renderer = TerminalRenderer::new(buf);
        renderer.render(&sample_report()).unwrap();
        let out = renderer.sink.lock();
        let text = String::from_utf8(out.clone()).unwrap();
        assert!(text.contains("[0:abc]"));
    }
}
