/// Letter runs longer than `min_len` characters, upper-cased, in order.
pub fn long_words_upper(text: &str, min_len: usize) -> Vec<String> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|word| word.chars().count() > min_len)
        .map(|word| word.to_uppercase())
        .collect()
}

/// Character length of each distinct word, first occurrence order.
pub fn lengths<S: AsRef<str>>(words: &[S]) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = Vec::new();
    for word in words {
        let word = word.as_ref();
        if out.iter().any(|(seen, _)| seen == word) {
            continue;
        }
        out.push((word.to_string(), word.chars().count()));
    }
    out
}
