/// A tokenized input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// `[name, args...]`, the argument list for `before` and `after`
    pub fn event_args(&self) -> Vec<String> {
        std::iter::once(self.name.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// Parse a raw input line into a command token and arguments
///
/// Splits on every single space, with no quoting or escaping:
/// - `greet Alice` → `greet`, `["Alice"]`
/// - `a  b` → `a`, `["", "b"]` (consecutive spaces keep empty tokens)
/// - `` (empty) → ``, `[]`
pub fn parse_line(input: &str) -> CommandLine {
    let mut tokens = input.split(' ').map(str::to_string);

    // split always yields at least one item
    let name = tokens.next().unwrap_or_default();
    CommandLine {
        name,
        args: tokens.collect(),
    }
}
