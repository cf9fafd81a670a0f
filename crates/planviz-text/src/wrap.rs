#![forbid(unsafe_code)]

//! Greedy token wrapping against a pixel budget.
//!
//! Detail text is split into word tokens at non-alphanumeric boundaries
//! (separators are tokens too, so `p.age` wraps as `p` `.` `age` and
//! nothing is lost). Lines accumulate whole tokens while the measured
//! width stays under the budget; a line always takes at least one token,
//! so a single oversized token occupies a line by itself rather than
//! looping forever.

use unicode_segmentation::UnicodeSegmentation;

use crate::measure::TextMeasurer;

/// Split text into wrap tokens at word boundaries, keeping separators.
///
/// # Example
/// ```
/// use planviz_text::split_tokens;
///
/// let tokens = split_tokens("n.prop");
/// assert_eq!(tokens, vec!["n", ".", "prop"]);
/// ```
#[must_use]
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split_word_bounds().collect()
}

/// Wrap `text` into lines no wider than `budget` pixels (except when a
/// single token alone exceeds it).
///
/// Tokens are accumulated greedily: the line grows while appending the
/// next token keeps the measured width strictly under the budget.
/// Concatenating the returned lines reproduces the input text exactly.
#[must_use]
pub fn wrap_tokens<M>(
    text: &str,
    budget: f64,
    font_family: &str,
    font_size: f64,
    measurer: &mut M,
) -> Vec<String>
where
    M: TextMeasurer + ?Sized,
{
    let tokens = split_tokens(text);
    let mut lines = Vec::new();
    let mut first = 0;
    while first < tokens.len() {
        let mut last = first + 1;
        while last < tokens.len()
            && measurer.text_width(&tokens[first..=last].concat(), font_family, font_size)
                < budget
        {
            last += 1;
        }
        lines.push(tokens[first..last].concat());
        first = last;
    }
    lines
}
