/// Words masked out of chirp bodies before storage.
const MASKED: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replace masked words with `****`. Matching is case-insensitive and only
/// on space-delimited tokens, so punctuation-attached forms pass through.
pub fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if MASKED.contains(&word.to_lowercase().as_str()) {
                "****"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_listed_words() {
        assert_eq!(clean_body("hello kerfuffle world"), "hello **** world");
        assert_eq!(clean_body("sharbert fornax"), "**** ****");
    }

    #[test]
    fn masking_is_case_insensitive() {
        assert_eq!(clean_body("what a KERFUFFLE today"), "what a **** today");
    }

    #[test]
    fn punctuation_attached_words_pass_through() {
        assert_eq!(clean_body("kerfuffle!"), "kerfuffle!");
    }

    #[test]
    fn clean_text_is_unchanged() {
        assert_eq!(clean_body("nothing to see here"), "nothing to see here");
    }
}
