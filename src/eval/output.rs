use std::io::Write;

/// Receives narration lines from the evaluator, one call per line, without a
/// trailing newline.
pub trait OutputSink {
    fn emit(&mut self, line: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line) {
            tracing::warn!("failed to write output: {}", e);
        }
    }
}

/// Collects lines, for tests and embedding.
impl OutputSink for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_lines() {
        let mut out: Vec<String> = Vec::new();
        let sink: &mut dyn OutputSink = &mut out;
        sink.emit("one");
        sink.emit("  two");
        assert_eq!(out, vec!["one", "  two"]);
    }
}
