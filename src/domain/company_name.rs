use itertools::Itertools;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

const COMPANY_SUFFIXES: [&str; 12] = [
    "ab",
    "hb",
    "kb",
    "ek",
    "for",
    "enskild",
    "firma",
    "handelsbolag",
    "kommanditbolag",
    "aktiebolag",
    "ekonomisk",
    "forening",
];

const STOP_WORDS: [&str; 7] = ["och", "i", "the", "and", "of", "sweden", "sverige"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedName {
    pub canonical: String,
    pub tokens: Vec<String>,
}

impl NormalizedName {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

pub fn normalize_name(raw: &str) -> NormalizedName {
    let folded = fold_diacritics(&raw.to_lowercase());

    let tokens: Vec<String> = folded
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .filter(|token| !is_ignored_word(token))
        .map(str::to_string)
        .collect();

    NormalizedName {
        canonical: tokens.iter().join(" "),
        tokens,
    }
}

pub fn registrable_domain(url: &str) -> String {
    let url = url.trim().to_lowercase();

    let host = match url.strip_prefix("https://") {
        Some(rest) => rest,
        None => url.strip_prefix("http://").unwrap_or(url.as_str()),
    };
    let host = host.strip_prefix("www.").unwrap_or(host);
    let host = host
        .split(|c: char| matches!(c, '/' | '?' | '#' | ':'))
        .next()
        .unwrap_or(host);

    host.to_string()
}

pub fn normalize_domain(url: &str) -> String {
    fold_diacritics(&registrable_domain(url))
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'å' | 'ä' => 'a',
            'ö' => 'o',
            'é' | 'è' => 'e',
            'ü' => 'u',
            other => other,
        })
        .collect::<String>()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn is_ignored_word(token: &str) -> bool {
    COMPANY_SUFFIXES.contains(&token) || STOP_WORDS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::{normalize_domain, normalize_name, registrable_domain};

    const SAMPLE_NAMES: [&str; 8] = [
        "K Frisör AB",
        "  Åsa's   Hårvård & Co  HB ",
        "ByChris.se Frisör AB",
        "Café Ñandú i Göteborg",
        "Ekonomisk förening Östra Äng",
        "THE Pizza\tPlace of Sweden",
        "Bröderna Nilsson Kommanditbolag 2",
        "",
    ];

    #[test]
    fn normalize_name_strips_suffixes_and_diacritics() {
        let name = normalize_name("K Frisör AB");

        assert_eq!(name.canonical, "k frisor");
        assert_eq!(name.tokens, vec!["k", "frisor"]);
    }

    #[test]
    fn normalize_name_drops_stop_words() {
        let name = normalize_name("THE Pizza Place of Sweden");

        assert_eq!(name.canonical, "pizza place");
    }

    #[test]
    fn normalize_name_folds_characters_outside_the_table() {
        assert_eq!(normalize_name("Café Ñandú").canonical, "cafe nandu");
        assert_eq!(normalize_name("Åsa Östlund").canonical, "asa ostlund");
    }

    #[test]
    fn normalize_name_removes_punctuation_without_splitting() {
        assert_eq!(normalize_name("ByChris.se Frisör AB").canonical, "bychrisse frisor");
        assert_eq!(normalize_name("Hans-Erik's Bygg").canonical, "hanseriks bygg");
    }

    #[test]
    fn normalize_name_output_is_canonical() {
        for raw in SAMPLE_NAMES {
            let canonical = normalize_name(raw).canonical;

            assert!(
                canonical
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '),
                "unexpected character in {:?}",
                canonical
            );
            assert!(!canonical.starts_with(' ') && !canonical.ends_with(' '));
            assert!(!canonical.contains("  "));
        }
    }

    #[test]
    fn normalize_name_is_idempotent() {
        for raw in SAMPLE_NAMES {
            let once = normalize_name(raw);
            let twice = normalize_name(&once.canonical);

            assert_eq!(once, twice);
        }
    }

    #[test]
    fn normalize_name_of_only_suffixes_is_empty() {
        let name = normalize_name("Handelsbolag AB i Sverige");

        assert!(name.is_empty());
        assert_eq!(name.canonical, "");
    }

    #[test]
    fn normalize_empty_input() {
        assert!(normalize_name("").is_empty());
        assert_eq!(normalize_domain(""), "");
    }

    #[test]
    fn normalize_domain_strips_scheme_www_path_and_port() {
        assert_eq!(
            normalize_domain("https://www.Example.se:8080/path"),
            normalize_domain("example.se")
        );
        assert_eq!(normalize_domain("http://www.kfrisor.se/om-oss"), "kfrisorse");
    }

    #[test]
    fn normalize_domain_folds_internationalized_hosts() {
        assert_eq!(normalize_domain("https://www.frisörhörnan.se"), "frisorhornanse");
    }

    #[test]
    fn registrable_domain_keeps_subdomains() {
        assert_eq!(
            registrable_domain("https://shop.Example.se:443/products?id=1"),
            "shop.example.se"
        );
        assert_eq!(registrable_domain("www.eniro.se/sami-frisor"), "eniro.se");
    }

    #[test]
    fn normalize_domain_drops_query_and_fragment_without_path() {
        assert_eq!(normalize_domain("kfrisor.se?ref=1"), "kfrisorse");
        assert_eq!(normalize_domain("https://www.kfrisor.se#kontakt"), "kfrisorse");
        assert_eq!(registrable_domain("linlugg.se?utm_source=x#top"), "linlugg.se");
    }
}
