use answerkey::{AnswerShape, Outcome, ResolutionDetails, SeedReport};

mod ansi {
    const RESET: &str = "\x1b[0m";

    /// Styles used by the reports, one SGR code each.
    #[derive(Debug, Clone, Copy)]
    pub enum Style {
        Dim,
        Bold,
        Green,
        Yellow,
        Blue,
        Cyan,
        Gray,
    }

    impl Style {
        fn code(self) -> &'static str {
            match self {
                Style::Dim => "\x1b[2m",
                Style::Bold => "\x1b[1m",
                Style::Green => "\x1b[32m",
                Style::Yellow => "\x1b[33m",
                Style::Blue => "\x1b[34m",
                Style::Cyan => "\x1b[36m",
                Style::Gray => "\x1b[90m",
            }
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, style: Style, s: impl AsRef<str>) -> String {
            let s = s.as_ref();
            if self.enabled { format!("{}{s}{RESET}", style.code()) } else { s.to_string() }
        }

        /// Section header line.
        pub fn rule(&self, title: &str) -> String {
            self.paint(Style::Gray, format!("━━━ {title} ━━━"))
        }
    }
}

use ansi::Style;

/// Per-file summaries go to stderr so stdout can carry JSON lines.
pub fn print_seed_reports(reports: &[SeedReport], color: bool) {
    let palette = ansi::Palette::new(color);

    for report in reports {
        eprintln!("\n{}", palette.rule(&report.source));
        eprintln!(
            "  rows: {}  │  resolved: {}  │  mcq: {}  │  msq: {}",
            palette.paint(Style::Bold, report.rows.to_string()),
            palette.paint(Style::Green, report.resolved.to_string()),
            palette.paint(Style::Blue, report.mcq.to_string()),
            palette.paint(Style::Blue, report.msq.to_string()),
        );
        // The example itself is already logged as a warning by the seeder.
        match report.unresolved.len() {
            0 => eprintln!("  {}", palette.paint(Style::Dim, "all answers resolved")),
            n => eprintln!("  {}", palette.paint(Style::Yellow, format!("⚠ {n} unresolved"))),
        }
        eprintln!("  {}", palette.paint(Style::Dim, format!("elapsed {:?}", report.elapsed)));
    }
    eprintln!();
}

pub fn print_explain(answer: &str, details: &ResolutionDetails, color: bool) {
    let palette = ansi::Palette::new(color);
    let res = &details.resolution;
    println!("\n{}", palette.paint(Style::Cyan, format!("⚙  Resolving: {answer:?}")));

    println!("\n{}", palette.rule("Shape"));
    println!("  {}", palette.paint(Style::Blue, shape_names(details.shape)));

    println!("\n{}", palette.rule("Options"));
    if res.option_texts.is_empty() {
        println!("  {}", palette.paint(Style::Dim, "no options, every token will miss"));
    }
    for (idx, text) in res.option_texts.iter().enumerate() {
        let label = palette.paint(Style::Gray, format!("[{idx}]"));
        println!("  {label} {} {text}", palette.paint(Style::Dim, letter(idx)));
    }

    println!("\n{}", palette.rule("Tokens"));
    if details.tokens.is_empty() {
        println!("  {}", palette.paint(Style::Dim, "no tokens extracted"));
    }
    for trace in &details.tokens {
        let verdict = match (trace.index, trace.rule) {
            (Some(idx), Some(rule)) if trace.duplicate => {
                palette.paint(Style::Dim, format!("= [{idx}] via {} (already selected)", rule.as_str()))
            }
            (Some(idx), Some(rule)) => palette.paint(Style::Green, format!("✓ [{idx}] via {}", rule.as_str())),
            _ => palette.paint(Style::Yellow, "✗ no match"),
        };
        println!(
            "  {} {} {verdict}",
            palette.paint(Style::Bold, format!("{:?}", trace.token)),
            palette.paint(Style::Dim, format!("({:?})", trace.origin)),
        );
    }

    println!("\n{}", palette.rule("Result"));
    match &res.outcome {
        Outcome::Resolved { indices } => {
            println!("  {} {}", palette.paint(Style::Dim, "answer:"), palette.paint(Style::Green, &res.answer_text));
            println!("  {} {indices:?}", palette.paint(Style::Dim, "indices:"));
        }
        Outcome::Fallback { raw } => {
            println!("  {} {}", palette.paint(Style::Dim, "answer:"), palette.paint(Style::Yellow, raw));
            println!("  {}", palette.paint(Style::Yellow, "unresolved: raw answer kept, would be reported"));
        }
    }
    let index = res.correct_index.map(|i| i.to_string()).unwrap_or_else(|| "null".to_string());
    println!("  {} {index}", palette.paint(Style::Dim, "correct_index:"));

    println!("\n{}", palette.rule("Timing"));
    println!("  total: {}", palette.paint(Style::Green, format!("{:?}", details.elapsed)));
    println!();
}

fn letter(idx: usize) -> String {
    u8::try_from(idx).ok().filter(|i| *i < 26).map(|i| char::from(b'A' + i).to_string()).unwrap_or_default()
}

fn shape_names(shape: AnswerShape) -> String {
    if shape.is_empty() {
        return "empty".to_string();
    }
    shape.iter_names().map(|(name, _)| name.to_ascii_lowercase()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_only_emits_codes_when_enabled() {
        assert_eq!(ansi::Palette::new(false).paint(Style::Green, "ok"), "ok");
        assert_eq!(ansi::Palette::new(true).paint(Style::Green, "ok"), "\x1b[32mok\x1b[0m");
        assert_eq!(ansi::Palette::new(false).rule("Tokens"), "━━━ Tokens ━━━");
    }

    #[test]
    fn option_letters_and_shape_names() {
        assert_eq!(letter(0), "A");
        assert_eq!(letter(25), "Z");
        assert_eq!(letter(26), "");
        assert_eq!(shape_names(AnswerShape::empty()), "empty");
        assert_eq!(shape_names(AnswerShape::HAS_DIGITS | AnswerShape::WRAPPED), "has_digits, wrapped");
    }
}
