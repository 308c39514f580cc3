
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;


pub fn normalize(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());

    for c in text.to_lowercase().nfd() {
        if is_combining_mark(c) {
            continue;
        }
        match c {
            'đ' | 'ð' => folded.push('d'),
            'ø' => folded.push('o'),
            'ł' => folded.push('l'),
            'æ' => folded.push_str("ae"),
            'œ' => folded.push_str("oe"),
            'ß' => folded.push_str("ss"),
            c if c.is_ascii_alphanumeric() => folded.push(c),
            c if c.is_whitespace() => folded.push(' '),
            _ => {}
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}


pub fn tokens(text: &str) -> Vec<String> {
    normalize(text).split(' ').filter(|t| !t.is_empty()).map(str::to_string).collect()
}
