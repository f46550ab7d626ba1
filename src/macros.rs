/// Compile a regex once and hand out a `&'static Regex`.
///
/// Patterns are literals, so a failed compile is a programming error caught
/// by the first test that touches the call site.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).expect("invalid regex literal"));
        &*RE
    }};
}
