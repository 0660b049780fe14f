use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn disabled() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colors the program name, redirection operators and a trailing `&`.
    ///
    /// Splits on single spaces so the rejoined line keeps the exact spacing
    /// the editor is displaying.
    pub fn highlight_line(&self, input: &str) -> String {
        if !self.is_enabled() {
            return input.to_string();
        }

        let mut parts: Vec<String> = input.split(' ').map(String::from).collect();
        let words: Vec<usize> = parts
            .iter()
            .enumerate()
            .filter(|(_, part)| !part.is_empty())
            .map(|(index, _)| index)
            .collect();
        let (Some(&first), Some(&last)) = (words.first(), words.last()) else {
            return input.to_string();
        };

        for &index in &words {
            let part = &parts[index];
            let styled = if index == first && !is_operator(part) {
                let command_style = Style::builder().foreground(Color::Cyan).bold().build();
                part.clone().style(command_style).to_string()
            } else if is_operator(part) {
                let operator_style = Style::builder().foreground(Color::Yellow).bold().build();
                part.clone().style(operator_style).to_string()
            } else if index == last && part == "&" {
                let background_style = Style::builder().foreground(Color::Green).build();
                part.clone().style(background_style).to_string()
            } else {
                continue;
            };
            parts[index] = styled;
        }

        parts.join(" ")
    }
}

fn is_operator(token: &str) -> bool {
    token == "<" || token == ">"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_is_identity() {
        let highlighter = SyntaxHighlighter::disabled();
        let line = "sort  <  in.txt > out &";
        assert_eq!(highlighter.highlight_line(line), line);
    }

    #[test]
    fn test_enabled_keeps_words() {
        let highlighter = SyntaxHighlighter::new();
        let line = "sort  < in.txt &";
        let highlighted = highlighter.highlight_line(line);
        for word in ["sort", "<", "in.txt", "&"] {
            assert!(highlighted.contains(word));
        }
        if !highlighter.is_enabled() {
            assert_eq!(highlighted, line);
        }
    }

    #[test]
    fn test_blank_line() {
        let highlighter = SyntaxHighlighter::new();
        assert_eq!(highlighter.highlight_line("   "), "   ");
    }
}
