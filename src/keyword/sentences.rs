//! Lazy sentence segmentation

/// Characters that end a sentence
const TERMINATORS: &[char] = &['.', '!', '?'];

/// Characters that may trail a terminator and still belong to the sentence
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201D}', '\u{2019}'];

/// Iterator over the sentences of a text
///
/// A sentence ends at a run of `.`, `!` or `?` (plus any closing quotes or
/// brackets) followed by whitespace or the end of the text. Returned sentences
/// are trimmed and never empty.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

/// Splits `text` into sentences lazily
///
/// ```
/// use site_sweep::keyword::sentences;
///
/// let parts: Vec<_> = sentences("UA is great. This has nothing UA-related.").collect();
/// assert_eq!(parts, vec!["UA is great.", "This has nothing UA-related."]);
/// ```
pub fn sentences(text: &str) -> Sentences<'_> {
    Sentences { rest: text }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let text = self.rest.trim_start();
        if text.is_empty() {
            self.rest = "";
            return None;
        }

        let (sentence, rest) = text.split_at(sentence_end(text));
        self.rest = rest;
        Some(sentence.trim_end())
    }
}

/// Byte offset just past the first sentence in `text`
fn sentence_end(text: &str) -> usize {
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !TERMINATORS.contains(&c) {
            continue;
        }

        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if TERMINATORS.contains(&next) || CLOSERS.contains(&next) {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        match chars.peek() {
            None => return end,
            Some(&(_, next)) if next.is_whitespace() => return end,
            _ => {}
        }
    }

    text.len()
}
