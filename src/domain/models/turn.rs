#[cfg(test)]
#[path = "turn_test.rs"]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum Speaker {
    User,
    Bot,
}

/// One utterance in the transcript. Turns are never edited after they have
/// been appended to a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn new(speaker: Speaker, text: &str) -> Turn {
        return Turn {
            speaker,
            text: text.trim().replace('\t', "  "),
        };
    }

    pub fn is_blank(&self) -> bool {
        return self.text.trim().is_empty();
    }

    /// Word wraps the turn text so no line is longer than `line_max_width`,
    /// unless a single word is already longer.
    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push("".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_words: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                let word_len = word.chars().count();
                if !current_words.is_empty() && word_len + char_count > line_max_width {
                    lines.push(current_words.join(" ").trim_end().to_string());
                    current_words = vec![word];
                    char_count = word_len + 1;
                } else {
                    current_words.push(word);
                    char_count += word_len + 1;
                }
            }

            if !current_words.is_empty() {
                lines.push(current_words.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
