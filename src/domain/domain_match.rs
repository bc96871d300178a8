use super::company_name::{normalize_domain, normalize_name, NormalizedName};

pub const MIN_SIGNIFICANT_TOKEN_LEN: usize = 3;

pub const MIN_TOKEN_MATCH_RATIO: f64 = 0.5;

pub fn significant_tokens(name: &NormalizedName) -> Vec<&str> {
    name.tokens
        .iter()
        .map(String::as_str)
        .filter(|token| token.len() >= MIN_SIGNIFICANT_TOKEN_LEN)
        .collect()
}

pub fn url_matches_company(url: &str, name: &NormalizedName) -> bool {
    let significant = significant_tokens(name);
    if significant.is_empty() {
        return false;
    }

    let domain = normalize_domain(url);
    if domain.contains(name.canonical.as_str()) {
        return true;
    }

    let matched = significant
        .iter()
        .filter(|token| domain.contains(**token))
        .count();

    match significant.len() {
        1 => matched == 1,
        total => matched as f64 / total as f64 >= MIN_TOKEN_MATCH_RATIO,
    }
}

pub fn find_match<'a, S: AsRef<str>>(
    company_name: &str,
    candidate_urls: &'a [S],
) -> Option<&'a str> {
    let name = normalize_name(company_name);

    if significant_tokens(&name).is_empty() {
        log::debug!("No significant words in company name: {}", company_name);
        return None;
    }

    candidate_urls
        .iter()
        .map(|url| url.as_ref())
        .find(|url| url_matches_company(url, &name))
}

#[cfg(test)]
mod tests {
    use super::find_match;

    fn urls(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn find_match_company_with_suffix() {
        let candidates = urls(&["https://www.kfrisor.se"]);

        assert_eq!(
            find_match("K Frisör AB", &candidates),
            Some("https://www.kfrisor.se")
        );
    }

    #[test]
    fn find_match_rejects_unrelated_domain() {
        let candidates = urls(&["https://www.google.com"]);

        assert_eq!(find_match("K Frisör AB", &candidates), None);
    }

    #[test]
    fn find_match_single_word_contained_in_domain() {
        let candidates = urls(&["https://elongroup.com"]);

        assert_eq!(find_match("Elon", &candidates), Some("https://elongroup.com"));
    }

    #[test]
    fn find_match_single_word_absent_from_domain() {
        let candidates = urls(&["https://unrelatedsite.com"]);

        assert_eq!(find_match("Elon", &candidates), None);
    }

    #[test]
    fn find_match_all_words_in_domain() {
        let candidates = urls(&["https://jakobsnickare.se"]);

        assert_eq!(
            find_match("Jakob Snickare", &candidates),
            Some("https://jakobsnickare.se")
        );
    }

    // Half of two words is enough, so a domain sharing only the trade word
    // is accepted. Kept as is: tightening it would drop truncated brand
    // domains like linlugg.se below.
    #[test]
    fn find_match_half_of_words_accepts_shared_trade_word() {
        let candidates = urls(&["https://snickarenacka.se"]);

        assert_eq!(
            find_match("Jakob Snickare", &candidates),
            Some("https://snickarenacka.se")
        );
    }

    #[test]
    fn find_match_partial_brand_domains() {
        assert!(find_match("Linlugg frisör AB", &urls(&["https://www.linlugg.se"])).is_some());
        assert!(find_match("ByChris.se Frisör AB", &urls(&["https://www.bychris.se"])).is_some());
        assert!(find_match("RS Frisör AB", &urls(&["https://www.rsfrisor.se"])).is_some());
        assert!(find_match("ELON Group AB", &urls(&["https://www.elon.se"])).is_some());
        assert!(find_match("ELON Group AB", &urls(&["https://www.elongroup.com"])).is_some());
    }

    #[test]
    fn find_match_ignores_path_segments() {
        let candidates = urls(&["https://www.eniro.se/sami-frisor"]);

        assert_eq!(find_match("Sami frisör AB", &candidates), None);
    }

    #[test]
    fn find_match_three_words_needs_two() {
        let name = "Norrlands Bygg Service";

        assert_eq!(
            find_match(name, &urls(&["https://norrlandsbygg.se"])),
            Some("https://norrlandsbygg.se")
        );
        assert_eq!(find_match(name, &urls(&["https://byggexperten.se"])), None);
    }

    #[test]
    fn find_match_first_candidate_wins() {
        let candidates = urls(&[
            "https://www.google.com/maps",
            "https://www.kfrisor.se/boka",
            "https://kfrisor.com",
        ]);

        assert_eq!(
            find_match("K Frisör AB", &candidates),
            Some("https://www.kfrisor.se/boka")
        );
    }

    #[test]
    fn find_match_without_significant_words() {
        let candidates = urls(&["https://www.ab.se", "https://kab.se"]);

        assert_eq!(find_match("K AB", &candidates), None);
        assert_eq!(find_match("", &candidates), None);
    }

    #[test]
    fn find_match_no_candidates() {
        let candidates: Vec<String> = vec![];

        assert_eq!(find_match("K Frisör AB", &candidates), None);
    }
}
