//! Splits one expanded source line into up to five tokens, giving every
//! later stage a uniform structural view of the line.

/// How many tokens a line carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCount {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    TooMany,
}

impl TokenCount {
    fn from_usize(n: usize) -> Self {
        match n {
            0 => Self::Zero,
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            5 => Self::Five,
            _ => Self::TooMany,
        }
    }
}

/// A tokenized line: up to five whitespace-separated words, with commas
/// normalised to their own free-standing token.
#[derive(Debug, Clone)]
pub struct TokenizedLine {
    pub words: [String; 5],
    pub count: TokenCount,
    pub had_label: bool,
}

impl Default for TokenCount {
    fn default() -> Self {
        TokenCount::Zero
    }
}

impl Default for TokenizedLine {
    fn default() -> Self {
        Self {
            words: [String::new(), String::new(), String::new(), String::new(), String::new()],
            count: TokenCount::Zero,
            had_label: false,
        }
    }
}

impl TokenizedLine {
    pub fn w(&self, index: usize) -> &str {
        &self.words[index - 1]
    }

    pub fn n(&self) -> usize {
        match self.count {
            TokenCount::Zero => 0,
            TokenCount::One => 1,
            TokenCount::Two => 2,
            TokenCount::Three => 3,
            TokenCount::Four => 4,
            TokenCount::Five => 5,
            TokenCount::TooMany => 6,
        }
    }

    /// Strips the label word from `w1`, shifting the rest left. Assumes
    /// `had_label` is true.
    pub fn delete_label(&mut self) {
        for i in 0..4 {
            self.words[i] = std::mem::take(&mut self.words[i + 1]);
        }
        self.words[4] = String::new();
        self.count = match self.count {
            TokenCount::TooMany => TokenCount::TooMany,
            _ => TokenCount::from_usize(self.n().saturating_sub(1)),
        };
        self.had_label = false;
    }
}

/// Tokenizes one expanded source line. A comment line (first
/// non-whitespace character is `;`) or a blank line tokenizes to
/// `TokenCount::Zero` with no words set.
pub fn tokenize(line: &str) -> TokenizedLine {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with(';') {
        return TokenizedLine::default();
    }

    // Commas become their own free-standing token, even between what a
    // human would read as values in a list.
    let normalised = line.replace(',', " , ");

    let mut words: [String; 5] = [String::new(), String::new(), String::new(), String::new(), String::new()];
    let mut total = 0usize;
    for token in normalised.split_whitespace() {
        if total < 5 {
            words[total] = token.to_string();
        }
        total += 1;
    }

    let mut tokenized = TokenizedLine {
        words,
        count: TokenCount::from_usize(total),
        had_label: false,
    };

    if tokenized.count != TokenCount::Zero {
        if let Some(stripped) = tokenized.words[0].strip_suffix(':') {
            tokenized.words[0] = stripped.to_string();
            tokenized.had_label = true;
        }
    }

    tokenized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_comment_lines_are_zero() {
        assert_eq!(tokenize("").count, TokenCount::Zero);
        assert_eq!(tokenize("   ").count, TokenCount::Zero);
        assert_eq!(tokenize("   ; a comment").count, TokenCount::Zero);
    }

    #[test]
    fn commas_become_their_own_token() {
        let t = tokenize("X: .data 3,-4,5");
        assert!(t.had_label);
        assert_eq!(t.w(1), "X");
        assert_eq!(t.w(2), ".data");
        assert_eq!(t.w(3), "3");
        assert_eq!(t.w(4), ",");
        assert_eq!(t.w(5), "-4");
        assert_eq!(t.count, TokenCount::TooMany);
    }

    #[test]
    fn too_many_tokens_is_flagged() {
        let t = tokenize("a b c d e f g");
        assert_eq!(t.count, TokenCount::TooMany);
    }

    #[test]
    fn delete_label_shifts_words_left() {
        let mut t = tokenize("mov @r1,@r2");
        // no label here, craft manually
        t.had_label = true;
        let before = t.words.clone();
        t.delete_label();
        assert_eq!(t.words[0], before[1]);
        assert_eq!(t.words[1], before[2]);
        assert_eq!(t.words[3], "");
    }

    #[test]
    fn label_colon_is_stripped() {
        let t = tokenize("LOOP: inc @r1");
        assert!(t.had_label);
        assert_eq!(t.w(1), "LOOP");
    }
}
