
use lazy_static::lazy_static;
use rand::Rng;
use rand::seq::SliceRandom;

lazy_static! {
    static ref PREFIXES: Vec<&'static str> =
        vec!["Mình muốn biết ", "Cho mình hỏi ", "Xin hỏi ", "Bạn cho mình hỏi "];
    static ref SUFFIXES: Vec<&'static str> = vec![" được không?", " giúp mình nhé.", " nhé!", "?"];
    static ref RESPONSE_SUFFIXES: Vec<&'static str> = vec![" 😊", "!", " nhé!"];

    static ref SYNONYMS: Vec<(&'static str, Vec<&'static str>)> = vec![
        ("giá", vec!["giá tiền", "chi phí", "mức giá", "bao nhiêu"]),
        ("sản phẩm", vec!["mặt hàng", "đồ", "món hàng", "hàng hóa"]),
        ("mua", vec!["tậu", "sắm", "đặt hàng", "order"]),
        ("quà", vec!["quà tặng", "món quà", "tặng phẩm"]),
        ("xem", vec!["cho xem", "xem thử", "tham khảo"]),
    ];
}


pub const TRAINING_VARIANTS: usize = 8;
pub const RESPONSE_VARIANTS: usize = 4;


pub fn substitute_synonyms<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let mut out = text.to_string();
    for (word, synonyms) in SYNONYMS.iter() {
        if out.contains(word) {
            if let Some(replacement) = synonyms.choose(rng) {
                out = out.replace(word, replacement);
            }
        }
    }
    out
}

pub fn generate_variants<R: Rng + ?Sized>(text: &str, n: usize, rng: &mut R) -> Vec<String> {
    let mut variants = vec![text.to_string()];
    for _ in 0..n {
        let prefix = PREFIXES.choose(rng).copied().unwrap_or_default();
        let body = substitute_synonyms(text, rng);
        let suffix = SUFFIXES.choose(rng).copied().unwrap_or_default();
        push_unique(&mut variants, format!("{prefix}{body}{suffix}"));
    }
    variants
}


pub fn generate_response_variants<R: Rng + ?Sized>(text: &str, n: usize, rng: &mut R) -> Vec<String> {
    let mut variants = vec![text.to_string()];
    for _ in 0..n {
        let body = substitute_synonyms(text, rng);
        let suffix = RESPONSE_SUFFIXES.choose(rng).copied().unwrap_or_default();
        push_unique(&mut variants, format!("{body}{suffix}"));
    }
    variants
}

fn push_unique(variants: &mut Vec<String>, candidate: String) {
    if !variants.contains(&candidate) {
        variants.push(candidate);
    }
}
